//! Single binary web server: HTML from templates/, static from /static, API via REST.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT.

use actix_files::Files;
use actix_web::{
    delete, get, post, put,
    web::{self, Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};
use tournament_scheduler_web::{
    compute_standings, generate_bracket, is_complete, report_winner, Bracket, Format,
    MatchLocation, Section, Tournament, TournamentId,
};

/// Per-tournament entry: session data + last activity time (for auto-cleanup).
struct TournamentEntry {
    tournament: Tournament,
    last_activity: Instant,
}

/// In-memory state: many tournaments by ID. Entries are removed after
/// 12h of inactivity.
type AppState = Data<RwLock<HashMap<TournamentId, TournamentEntry>>>;

/// Inactivity threshold: tournaments not accessed for this long are removed.
const INACTIVITY_TIMEOUT: Duration = Duration::from_secs(12 * 3600);

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreateTournamentBody {
    #[serde(default)]
    format: Format,
}

#[derive(Deserialize)]
struct TeamBody {
    name: String,
}

#[derive(Deserialize)]
struct SetFormatBody {
    format: Format,
}

#[derive(Deserialize)]
struct DeclareWinnerBody {
    #[serde(default)]
    section: Section,
    round: usize,
    match_index: usize,
    winner: String,
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "tournament-scheduler-web",
    })
}

/// Avoid 404 in browser tab: favicon not required for app logic.
#[get("/favicon.ico")]
async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

/// Create a new tournament (returns it with id; client stores id for
/// subsequent requests).
#[post("/api/tournaments")]
async fn api_create_tournament(
    state: AppState,
    body: Option<Json<CreateTournamentBody>>,
) -> HttpResponse {
    let format = body.map(|b| b.format).unwrap_or_default();
    let tournament = Tournament::new(format);
    let id = tournament.id;
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    g.insert(
        id,
        TournamentEntry {
            tournament,
            last_activity: Instant::now(),
        },
    );
    HttpResponse::Ok().json(&g[&id].tournament)
}

/// Get a tournament by id (404 if not found). Touching it refreshes last_activity.
#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get_mut(&path.id) {
        Some(entry) => {
            entry.last_activity = Instant::now();
            HttpResponse::Ok().json(&entry.tournament)
        }
        None => HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" })),
    }
}

/// Add a team (before or between brackets; generating discards the old bracket).
#[post("/api/tournaments/{id}/teams")]
async fn api_add_team(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<TeamBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => {
            return HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" }))
        }
    };
    entry.last_activity = Instant::now();
    let t = &mut entry.tournament;
    match t.add_team(body.name.as_str()) {
        Ok(()) => HttpResponse::Ok().json(t),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Remove a team by name.
#[delete("/api/tournaments/{id}/teams")]
async fn api_remove_team(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<TeamBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => {
            return HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" }))
        }
    };
    entry.last_activity = Instant::now();
    let t = &mut entry.tournament;
    match t.remove_team(&body.name) {
        Ok(()) => HttpResponse::Ok().json(t),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Select tournament format (applies to the next generated bracket).
#[put("/api/tournaments/{id}/format")]
async fn api_set_format(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<SetFormatBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => {
            return HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" }))
        }
    };
    entry.last_activity = Instant::now();
    let t = &mut entry.tournament;
    t.set_format(body.format);
    HttpResponse::Ok().json(t)
}

/// Generate a bracket from the current team list, discarding any previous one.
#[post("/api/tournaments/{id}/bracket")]
async fn api_generate_bracket(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => {
            return HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" }))
        }
    };
    entry.last_activity = Instant::now();
    let t = &mut entry.tournament;
    match generate_bracket(t) {
        Ok(()) => HttpResponse::Ok().json(t),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Declare the winner of one match and propagate through the bracket.
#[put("/api/tournaments/{id}/bracket/winner")]
async fn api_declare_winner(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<DeclareWinnerBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => {
            return HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" }))
        }
    };
    entry.last_activity = Instant::now();
    let t = &mut entry.tournament;
    let location = MatchLocation::new(body.section, body.round, body.match_index);
    match report_winner(t, location, &body.winner) {
        Ok(()) => HttpResponse::Ok().json(t),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Round-robin points table, completion flag, and champion (if decided).
#[get("/api/tournaments/{id}/standings")]
async fn api_standings(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => {
            return HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" }))
        }
    };
    entry.last_activity = Instant::now();
    let t = &entry.tournament;
    match &t.bracket {
        Some(bracket @ Bracket::RoundRobin { rounds }) => {
            HttpResponse::Ok().json(serde_json::json!({
                "rows": compute_standings(&t.teams, rounds),
                "complete": is_complete(bracket),
                "champion": t.champion,
            }))
        }
        Some(_) => HttpResponse::BadRequest()
            .json(serde_json::json!({ "error": "Standings only apply to round robin" })),
        None => HttpResponse::BadRequest()
            .json(serde_json::json!({ "error": "No bracket has been generated" })),
    }
}

/// Back to team entry: drop the bracket and champion, keep the team list.
#[post("/api/tournaments/{id}/reset")]
async fn api_reset_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => {
            return HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" }))
        }
    };
    entry.last_activity = Instant::now();
    let t = &mut entry.tournament;
    t.reset();
    HttpResponse::Ok().json(t)
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(HashMap::<TournamentId, TournamentEntry>::new()));

    // Background task: every 30 minutes, remove tournaments inactive for 12+ hours
    let state_cleanup = state.clone();
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let before = g.len();
            g.retain(|_, entry| entry.last_activity.elapsed() < INACTIVITY_TIMEOUT);
            let removed = before - g.len();
            if removed > 0 {
                log::info!(
                    "Cleaned up {} inactive tournament(s) (no activity for 12h)",
                    removed
                );
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .route("/", web::get().to(serve_index_async))
            .service(api_health)
            .service(favicon)
            .service(api_create_tournament)
            .service(api_get_tournament)
            .service(api_add_team)
            .service(api_remove_team)
            .service(api_set_format)
            .service(api_generate_bracket)
            .service(api_declare_winner)
            .service(api_standings)
            .service(api_reset_tournament)
            .service(Files::new("/static", "static").show_files_listing())
    })
    .bind(bind)?
    .run()
    .await
}

async fn serve_index_async() -> HttpResponse {
    let html = include_str!("../../templates/index.html");
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html)
}
