//! In-memory transport replaying scripted responses

use crate::error::GeoError;
use crate::transport::{HttpResponse, Transport};
use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;

pub(crate) fn json_response(status: u16, body: Value) -> HttpResponse {
    HttpResponse {
        status: StatusCode::from_u16(status).unwrap(),
        content_type: Some("application/json".to_string()),
        body: body.to_string(),
    }
}

pub(crate) fn text_response(status: u16, content_type: &str, body: &str) -> HttpResponse {
    HttpResponse {
        status: StatusCode::from_u16(status).unwrap(),
        content_type: Some(content_type.to_string()),
        body: body.to_string(),
    }
}

/// Answers requests with the scripted responses, in order, and records every
/// request as `"<METHOD> <url>"`
#[derive(Default)]
pub(crate) struct ScriptedTransport {
    responses: Mutex<VecDeque<HttpResponse>>,
    requests: Mutex<Vec<String>>,
    bodies: Mutex<Vec<Value>>,
}

impl ScriptedTransport {
    pub(crate) fn new(responses: Vec<HttpResponse>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            ..Self::default()
        }
    }

    pub(crate) fn requested(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn posted_bodies(&self) -> Vec<Value> {
        self.bodies.lock().unwrap().clone()
    }

    fn answer(&self, method: &str, url: Url) -> Result<HttpResponse, GeoError> {
        self.requests.lock().unwrap().push(format!("{method} {url}"));
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| GeoError::UnexpectedResponse(format!("no scripted response for {method} {url}")))
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn get(&self, url: Url) -> Result<HttpResponse, GeoError> {
        self.answer("GET", url)
    }

    async fn post(&self, url: Url, body: &Value) -> Result<HttpResponse, GeoError> {
        self.bodies.lock().unwrap().push(body.clone());
        self.answer("POST", url)
    }
}
