//! JSON API over the simulator: run tournaments, then read rounds, players and standings.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Override with env: HOST (e.g. 127.0.0.1), PORT (e.g. 8080), RUST_LOG (e.g. debug).

use actix_web::{
    delete, get, post,
    web::{self, Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};
use swiss_tournament_sim::{
    run_simulation, CompletedSimulation, SimulationConfig, TournamentError, TournamentId,
};

/// Per-simulation entry: finished tournament + last activity time (for auto-cleanup).
struct SimulationEntry {
    simulation: CompletedSimulation,
    last_activity: Instant,
}

/// In-memory state: completed simulations by tournament id. Idle entries are purged.
type AppState = Data<RwLock<HashMap<TournamentId, SimulationEntry>>>;

/// Inactivity threshold: simulations not accessed for this long are removed.
const INACTIVITY_TIMEOUT: Duration = Duration::from_secs(12 * 3600);

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

/// Headline numbers of one run.
#[derive(Serialize)]
struct SimulationSummary {
    id: TournamentId,
    player_count: usize,
    draw_percentage: u32,
    round_count: u32,
    total_matches: usize,
}

impl SimulationSummary {
    fn from_simulation(s: &CompletedSimulation) -> Self {
        Self {
            id: s.tournament.id,
            player_count: s.tournament.player_count,
            draw_percentage: s.tournament.draw_percentage,
            round_count: s.tournament.round_count,
            total_matches: s.matches.len(),
        }
    }
}

/// Path segment: simulation id (e.g. /api/simulations/{id})
#[derive(Deserialize)]
struct SimulationPath {
    id: TournamentId,
}

fn error_response(e: &TournamentError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        TournamentError::InvalidConfiguration(_) => HttpResponse::BadRequest().json(body),
        TournamentError::SimulationNotFound(_) => HttpResponse::NotFound().json(body),
    }
}

/// Look up a simulation, refresh its activity time and render it with `view`.
fn with_simulation<F>(state: &AppState, id: TournamentId, view: F) -> HttpResponse
where
    F: FnOnce(&CompletedSimulation) -> HttpResponse,
{
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get_mut(&id) {
        Some(entry) => {
            entry.last_activity = Instant::now();
            view(&entry.simulation)
        }
        None => error_response(&TournamentError::SimulationNotFound(id)),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "swiss-tournament-sim",
    })
}

/// Create and run a simulation. Returns its summary; the id is used for later reads.
#[post("/api/simulations")]
async fn api_create_simulation(state: AppState, body: Json<SimulationConfig>) -> HttpResponse {
    let config = body.into_inner();
    if let Err(e) = config.validate() {
        log::warn!("Rejected simulation request {:?}: {}", config, e);
        return error_response(&e);
    }
    // Pairing is CPU-bound; keep it off the actix worker.
    let simulation = match web::block(move || run_simulation(&config)).await {
        Ok(Ok(s)) => s,
        Ok(Err(e)) => return error_response(&e),
        Err(e) => {
            log::error!("Simulation task failed: {}", e);
            return HttpResponse::InternalServerError().body("simulation failed");
        }
    };
    let summary = SimulationSummary::from_simulation(&simulation);
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    g.insert(
        summary.id,
        SimulationEntry {
            simulation,
            last_activity: Instant::now(),
        },
    );
    HttpResponse::Ok().json(summary)
}

#[get("/api/simulations/{id}")]
async fn api_get_simulation(state: AppState, path: Path<SimulationPath>) -> HttpResponse {
    with_simulation(&state, path.id, |s| {
        HttpResponse::Ok().json(SimulationSummary::from_simulation(s))
    })
}

/// Matches grouped by round.
#[get("/api/simulations/{id}/rounds")]
async fn api_get_rounds(state: AppState, path: Path<SimulationPath>) -> HttpResponse {
    with_simulation(&state, path.id, |s| HttpResponse::Ok().json(s.rounds()))
}

/// Per-player statistics in roster order.
#[get("/api/simulations/{id}/players")]
async fn api_get_players(state: AppState, path: Path<SimulationPath>) -> HttpResponse {
    with_simulation(&state, path.id, |s| HttpResponse::Ok().json(s.player_stats()))
}

#[get("/api/simulations/{id}/standings")]
async fn api_get_standings(state: AppState, path: Path<SimulationPath>) -> HttpResponse {
    with_simulation(&state, path.id, |s| HttpResponse::Ok().json(s.standings()))
}

#[delete("/api/simulations/{id}")]
async fn api_delete_simulation(state: AppState, path: Path<SimulationPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.remove(&path.id) {
        Some(_) => HttpResponse::NoContent().finish(),
        None => error_response(&TournamentError::SimulationNotFound(path.id)),
    }
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

    let state = Data::new(RwLock::new(HashMap::<TournamentId, SimulationEntry>::new()));

    // Every 30 minutes, drop simulations idle for 12+ hours
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
                log::info!("Cleaned up {} inactive simulation(s) (no activity for 12h)", removed);
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_create_simulation)
            .service(api_get_simulation)
            .service(api_get_rounds)
            .service(api_get_players)
            .service(api_get_standings)
            .service(api_delete_simulation)
    })
    .bind(bind)?
    .run()
    .await
}
