//! In-memory stand-in for the upstream creature REST API.
//!
//! Serves the three endpoints the façade consumes, with the same document
//! shapes as the real service. Reference URLs in listings point back at this
//! server (built from the request's `Host` header). Individual creatures can
//! be given artificial latency or made to fail, which lets tests exercise
//! ordering and failure handling over real HTTP.

use std::{
    collections::{BTreeSet, HashMap, HashSet},
    sync::Arc,
    time::Duration,
};

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::net::TcpListener;

#[derive(Clone, Debug)]
pub struct Species {
    pub id: u32,
    pub name: String,
    pub height: u32,
    pub weight: u32,
    pub abilities: Vec<String>,
    pub types: Vec<String>,
}

impl Species {
    pub fn new(id: u32, name: &str, height: u32, weight: u32, abilities: &[&str], types: &[&str]) -> Self {
        Self {
            id,
            name: name.to_string(),
            height,
            weight,
            abilities: abilities.iter().map(|a| a.to_string()).collect(),
            types: types.iter().map(|t| t.to_string()).collect(),
        }
    }

    /// The upstream detail document for this species.
    pub fn document(&self, base: &str) -> Value {
        let abilities: Vec<Value> = self
            .abilities
            .iter()
            .enumerate()
            .map(|(i, name)| {
                json!({
                    "ability": {"name": name, "url": format!("{base}/ability/{name}/")},
                    "is_hidden": i > 0,
                    "slot": i + 1,
                })
            })
            .collect();
        json!({
            "id": self.id,
            "name": self.name,
            "height": self.height,
            "weight": self.weight,
            "base_experience": 64,
            "order": self.id,
            "abilities": abilities,
        })
    }

    fn reference(&self, base: &str) -> Value {
        json!({"name": self.name, "url": format!("{base}/pokemon/{}/", self.id)})
    }
}

/// Fixture data plus per-creature fault injection.
#[derive(Clone, Debug, Default)]
pub struct Upstream {
    species: Vec<Species>,
    latency: HashMap<String, Duration>,
    broken: HashSet<String>,
}

impl Upstream {
    /// A handful of well-known creatures spread over five types.
    pub fn sample() -> Self {
        Self::default()
            .with_species(Species::new(1, "bulbasaur", 7, 69, &["overgrow", "chlorophyll"], &["grass", "poison"]))
            .with_species(Species::new(2, "ivysaur", 10, 130, &["overgrow", "chlorophyll"], &["grass", "poison"]))
            .with_species(Species::new(3, "venusaur", 20, 1000, &["overgrow", "chlorophyll"], &["grass", "poison"]))
            .with_species(Species::new(4, "charmander", 6, 85, &["blaze", "solar-power"], &["fire"]))
            .with_species(Species::new(7, "squirtle", 5, 90, &["torrent", "rain-dish"], &["water"]))
            .with_species(Species::new(25, "pikachu", 4, 60, &["static", "lightning-rod"], &["electric"]))
            .with_species(Species::new(26, "raichu", 8, 300, &["static", "lightning-rod"], &["electric"]))
    }

    pub fn with_species(mut self, species: Species) -> Self {
        self.species.push(species);
        self.species.sort_by_key(|s| s.id);
        self
    }

    /// Delay every detail response for `name` by `latency`.
    pub fn with_latency(mut self, name: &str, latency: Duration) -> Self {
        self.latency.insert(name.to_string(), latency);
        self
    }

    /// Answer every detail request for `name` with a 500.
    pub fn with_broken(mut self, name: &str) -> Self {
        self.broken.insert(name.to_string());
        self
    }

    fn find(&self, name_or_id: &str) -> Option<&Species> {
        match name_or_id.parse::<u32>() {
            Ok(id) => self.species.iter().find(|s| s.id == id),
            Err(_) => self.species.iter().find(|s| s.name == name_or_id),
        }
    }

    fn known_types(&self) -> BTreeSet<&str> {
        self.species
            .iter()
            .flat_map(|s| s.types.iter().map(String::as_str))
            .collect()
    }
}

pub type Db = Arc<Upstream>;

pub fn app() -> Router {
    app_with(Upstream::sample())
}

pub fn app_with(upstream: Upstream) -> Router {
    let db: Db = Arc::new(upstream);
    Router::new()
        .route("/pokemon", get(list_pokemon))
        .route("/pokemon/{name_or_id}", get(get_pokemon))
        .route("/pokemon/{name_or_id}/", get(get_pokemon))
        .route("/type/{name}", get(get_type))
        .route("/type/{name}/", get(get_type))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with(listener, Upstream::sample()).await
}

pub async fn run_with(listener: TcpListener, upstream: Upstream) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(upstream)).await
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    limit: Option<usize>,
    offset: Option<usize>,
}

fn base_url(headers: &HeaderMap) -> String {
    let host = headers
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("localhost");
    format!("http://{host}")
}

async fn list_pokemon(
    State(db): State<Db>,
    headers: HeaderMap,
    Query(params): Query<ListParams>,
) -> Json<Value> {
    let base = base_url(&headers);
    let limit = params.limit.unwrap_or(20);
    let offset = params.offset.unwrap_or(0);
    let results: Vec<Value> = db
        .species
        .iter()
        .skip(offset)
        .take(limit)
        .map(|s| s.reference(&base))
        .collect();
    Json(json!({
        "count": db.species.len(),
        "next": null,
        "previous": null,
        "results": results,
    }))
}

async fn get_pokemon(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(name_or_id): Path<String>,
) -> Response {
    let Some(species) = db.find(&name_or_id) else {
        return (StatusCode::NOT_FOUND, "Not Found").into_response();
    };
    if let Some(latency) = db.latency.get(&species.name) {
        tokio::time::sleep(*latency).await;
    }
    if db.broken.contains(&species.name) {
        return (StatusCode::INTERNAL_SERVER_ERROR, "internal error").into_response();
    }
    Json(species.document(&base_url(&headers))).into_response()
}

async fn get_type(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(name): Path<String>,
) -> Response {
    if !db.known_types().contains(name.as_str()) {
        return (StatusCode::NOT_FOUND, "Not Found").into_response();
    }
    let base = base_url(&headers);
    let members: Vec<Value> = db
        .species
        .iter()
        .filter(|s| s.types.contains(&name))
        .map(|s| json!({"pokemon": s.reference(&base), "slot": 1}))
        .collect();
    Json(json!({"name": name, "pokemon": members})).into_response()
}
