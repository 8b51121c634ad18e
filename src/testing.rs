//! In-memory stand-ins for the model and the places index

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::agent::provider::LlmProvider;
use crate::agent::{
    AssistantToolCall, ChatCompletionResponse, Choice, FunctionCall, GenerationOptions, Message, Role,
};
use crate::error::Result;
use crate::maps::{Geometry, LatLng, Leg, NearbySearch, PlaceDetails, PlaceResult, PlacesProvider, Route, Step};

type Responder = Box<dyn Fn(&[Message]) -> ChatCompletionResponse + Send + Sync>;

/// Scripted chat model that records every request it sees
pub struct FakeLlm {
    responder: Responder,
    requests: Mutex<Vec<(Vec<Message>, GenerationOptions)>>,
}

impl FakeLlm {
    /// Answers with whatever `f` makes of the last user message
    pub fn replying(f: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        Self::scripted(move |messages| text_response(&f(last_user_text(messages))))
    }

    /// Full control over the response
    pub fn scripted(f: impl Fn(&[Message]) -> ChatCompletionResponse + Send + Sync + 'static) -> Self {
        FakeLlm {
            responder: Box::new(f),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Last user message of the most recent request
    pub fn last_prompt(&self) -> Option<String> {
        self.last_request().map(|(messages, _)| last_user_text(&messages).to_string())
    }

    pub fn last_request(&self) -> Option<(Vec<Message>, GenerationOptions)> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl LlmProvider for FakeLlm {
    fn default_model(&self) -> &str {
        "fake-model"
    }

    async fn generate(&self, messages: &[Message], options: &GenerationOptions) -> Result<ChatCompletionResponse> {
        self.requests
            .lock()
            .unwrap()
            .push((messages.to_vec(), options.clone()));
        Ok((self.responder)(messages))
    }
}

fn last_user_text(messages: &[Message]) -> &str {
    messages
        .iter()
        .rev()
        .find(|m| m.role == Role::User)
        .map(|m| m.content.as_str())
        .unwrap_or_default()
}

fn response(message: Message, finish_reason: &str) -> ChatCompletionResponse {
    ChatCompletionResponse {
        id: "chatcmpl-test".to_string(),
        model: "fake-model".to_string(),
        choices: vec![Choice {
            index: 0,
            message,
            finish_reason: Some(finish_reason.to_string()),
        }],
        usage: None,
    }
}

/// Plain text completion
pub fn text_response(text: &str) -> ChatCompletionResponse {
    response(Message::assistant(text), "stop")
}

/// Completion asking for a single tool call with raw `arguments`
pub fn tool_call_response(name: &str, arguments: &str) -> ChatCompletionResponse {
    let mut message = Message::assistant("");
    message.tool_calls = Some(vec![AssistantToolCall {
        id: "call_1".to_string(),
        call_type: "function".to_string(),
        function: FunctionCall {
            name: name.to_string(),
            arguments: arguments.to_string(),
        },
    }]);
    response(message, "tool_calls")
}

/// Longitude every keyword place sits on
pub const FAKE_LNG: f64 = -75.0;

/// Places index backed by fixed tables.
///
/// Keyword places get the id `id-{name}` and sit on `FAKE_LNG`. Unkeyed
/// searches return the sight registered for that exact location, or the
/// origin place when there is none.
#[derive(Default)]
pub struct FakePlaces {
    by_keyword: HashMap<String, Vec<PlaceResult>>,
    sights: HashMap<String, Vec<PlaceResult>>,
    origin: Vec<PlaceResult>,
    names: HashMap<String, String>,
    route: Option<Route>,
    searches: Mutex<Vec<NearbySearch>>,
}

fn place(name: &str, place_id: &str, lat: f64, lng: f64) -> PlaceResult {
    PlaceResult {
        name: name.to_string(),
        place_id: place_id.to_string(),
        geometry: Geometry {
            location: LatLng { lat, lng },
        },
    }
}

impl FakePlaces {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_keyword(mut self, keyword: &str, places: &[(&str, f64)]) -> Self {
        let results = places
            .iter()
            .map(|(name, lat)| {
                let id = format!("id-{}", name);
                self.names.insert(id.clone(), name.to_string());
                place(name, &id, *lat, FAKE_LNG)
            })
            .collect();
        self.by_keyword.insert(keyword.to_string(), results);
        self
    }

    /// The place the player stands at, named "Origin"
    pub fn with_origin(mut self, place_id: &str) -> Self {
        self.names.insert(place_id.to_string(), "Origin".to_string());
        self.origin = vec![place("Origin", place_id, 0.0, FAKE_LNG)];
        self
    }

    /// Single-leg route returned for any origin/destination pair
    pub fn with_route(mut self, points: &[(f64, f64)]) -> Self {
        let steps = points
            .iter()
            .map(|(lat, lng)| Step {
                end_location: LatLng { lat: *lat, lng: *lng },
            })
            .collect();
        self.route = Some(Route {
            legs: vec![Leg { steps }],
        });
        self
    }

    pub fn with_sight(mut self, location: &str, name: &str) -> Self {
        let id = format!("sight-{}", name);
        self.sights
            .entry(location.to_string())
            .or_default()
            .push(place(name, &id, 0.0, 0.0));
        self
    }

    /// Every nearby search issued so far
    pub fn searches(&self) -> Vec<NearbySearch> {
        self.searches.lock().unwrap().clone()
    }
}

#[async_trait]
impl PlacesProvider for FakePlaces {
    async fn nearby_search(&self, search: &NearbySearch) -> Result<Vec<PlaceResult>> {
        self.searches.lock().unwrap().push(search.clone());

        let results = match &search.keyword {
            Some(keyword) => self.by_keyword.get(keyword).cloned().unwrap_or_default(),
            None => self
                .sights
                .get(&search.location)
                .cloned()
                .unwrap_or_else(|| self.origin.clone()),
        };
        Ok(results)
    }

    async fn place_details(&self, place_id: &str) -> Result<PlaceDetails> {
        let Some(name) = self.names.get(place_id) else {
            return Ok(PlaceDetails::default());
        };

        let mut extra = serde_json::Map::new();
        extra.insert("vicinity".to_string(), format!("1 {} Way", name).into());
        Ok(PlaceDetails {
            name: Some(name.clone()),
            extra,
        })
    }

    async fn directions(&self, _origin: &str, _destination: &str) -> Result<Vec<Route>> {
        Ok(self.route.iter().cloned().collect())
    }
}
