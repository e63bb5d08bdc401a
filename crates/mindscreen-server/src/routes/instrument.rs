use axum::Json;
use axum::extract::State;
use serde::Serialize;

use mindscreen_instruments::scoring::Item;

use crate::state::AppState;

#[derive(Serialize)]
pub struct InstrumentDetail {
    id: String,
    name: String,
    max_score: u8,
    items: Vec<Item>,
}

pub async fn get_instrument(State(state): State<AppState>) -> Json<InstrumentDetail> {
    let instrument = &state.instrument;
    Json(InstrumentDetail {
        id: instrument.id().to_string(),
        name: instrument.name().to_string(),
        max_score: instrument.max_score(),
        items: instrument.items().to_vec(),
    })
}
