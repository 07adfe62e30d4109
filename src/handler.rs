// HTTP handler bindings for the territory bot API
//
// This module provides thin wrapper functions that bind Rocket HTTP routes
// to the Bot's session methods. Handlers are responsible for:
// - Deserializing incoming JSON requests
// - Extracting the Bot instance from Rocket's managed state
// - Delegating to Bot methods
// - Serializing responses

use rocket::http::Status;
use rocket::serde::json::Json;
use serde_json::Value;

use territory_bot::bot::Bot;
use territory_bot::types::TurnRequest;

/// GET / endpoint
/// Returns bot metadata
#[get("/")]
pub fn index(bot: &rocket::State<Bot>) -> Json<Value> {
    Json(bot.info())
}

/// POST /start endpoint
/// Creates a fresh agent for the game
#[post("/start", format = "json", data = "<start_req>")]
pub fn start(bot: &rocket::State<Bot>, start_req: Json<TurnRequest>) -> Status {
    bot.start(&start_req);

    Status::Ok
}

/// POST /move endpoint
/// Called each tick to compute and return the next move
#[post("/move", format = "json", data = "<move_req>")]
pub fn get_move(bot: &rocket::State<Bot>, move_req: Json<TurnRequest>) -> Json<Value> {
    Json(bot.get_move(&move_req))
}

/// POST /end endpoint
/// Drops the game's agent
#[post("/end", format = "json", data = "<end_req>")]
pub fn end(bot: &rocket::State<Bot>, end_req: Json<TurnRequest>) -> Status {
    bot.end(&end_req);

    Status::Ok
}
