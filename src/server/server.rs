use bytes::Bytes;
use chrono::{NaiveDateTime, Utc};
use http_body_util::Full;
use hyper::{
    body::Incoming,
    header::{HeaderValue, CONTENT_TYPE},
    service::Service,
    Method, Request, Response, StatusCode,
};
use regex::Regex;
use serde::Serialize;
use tracing::{debug, error, warn};
use url_escape::decode;

use std::{collections::HashMap, future::Future, pin::Pin, sync::Arc};

use crate::{
    cafe::{directory::CafeDirectory, region::Region},
    error::StatusError,
    presentation::detail::CafeDetail,
    status::formatter::CafeStatusFormatter,
    timing::clock::{resolve_local, Clock, FixedClock},
    ISO_FORMAT,
};

use super::response::{CafeList, CafeSummary};

/// The Server
///
/// Handles the API endpoints. Cafes come from the `CafeDirectory` loaded at
/// startup and the open/closed computation is done by `CafeStatusFormatter`.
///
/// This struct implements the `Service` trait from `hyper`. It is cloned for
/// every connection; everything it holds is behind an `Arc` and read only.
#[derive(Clone)]
pub struct Server {
    directory: Arc<CafeDirectory>,
    formatter: Arc<CafeStatusFormatter>,
    clock: Arc<dyn Clock + Send + Sync>,
    region_sanitizer: Regex,
}

impl Server {
    pub fn setup(directory: Arc<CafeDirectory>, clock: Arc<dyn Clock + Send + Sync>) -> Self {
        Self {
            directory,
            formatter: Arc::new(CafeStatusFormatter::new()),
            clock,
            region_sanitizer: Regex::new(r"^\w+$").unwrap(),
        }
    }

    /// Parses the query parameters and returns a `hashmap` of key pair values
    /// Returns `None` if a pair has no `=`. Empty pairs are skipped.
    fn parse_params(text: &str) -> Option<HashMap<String, String>> {
        let mut map: HashMap<String, String> = HashMap::new();
        for pair in text.split('&').filter(|pair| !pair.is_empty()) {
            let (key, value) = pair.split_once('=')?;
            let value = value.replace('+', " ");
            map.insert(key.to_string(), decode(&value).to_string());
        }
        Some(map)
    }

    /// Reads and validates the `region` parameter.
    fn region_param(&self, map: &HashMap<String, String>) -> Result<Region, String> {
        let Some(region) = map.get("region") else {
            return Err("region not provided.".to_string());
        };
        if !self.region_sanitizer.is_match(region) {
            return Err("Malformed Region".to_string());
        }
        region.parse()
    }

    /// The clock a request is answered with.
    ///
    /// With an `at` parameter (`YYYY-MM-DDTHH:MM:SS`, wall clock time in the
    /// region) the status is worked out for that moment instead of now.
    fn request_clock(
        &self,
        region: Region,
        map: &HashMap<String, String>,
    ) -> Result<Arc<dyn Clock + Send + Sync>, String> {
        let Some(at) = map.get("at") else {
            return Ok(self.clock.clone());
        };
        let local = NaiveDateTime::parse_from_str(at, ISO_FORMAT)
            .map_err(|_| "Malformed Date".to_string())?;
        let resolved = resolve_local(region.timezone(), local).map_err(|err| err.to_string())?;
        Ok(Arc::new(FixedClock(resolved.with_timezone(&Utc))))
    }

    /// The /api/cafes API endpoint.
    ///
    /// Takes a required `region` and an optional `at`, and lists every cafe in
    /// the region with its status. A cafe with an unusable schedule is listed
    /// with its hours unavailable rather than failing the whole list.
    ///
    /// Returns a 503 when the clock cannot be read.
    fn cafe_list(&self, query: Option<&str>) -> Result<Response<Full<Bytes>>, hyper::Error> {
        let Some(params) = query else {
            return Self::bad_request("Parameters not provided. Required region + Optional at.");
        };
        let Some(map) = Self::parse_params(params) else {
            return Self::bad_request("Malformed Parameters.");
        };
        let region = match self.region_param(&map) {
            Ok(region) => region,
            Err(message) => return Self::bad_request(&message),
        };
        let clock = match self.request_clock(region, &map) {
            Ok(clock) => clock,
            Err(message) => return Self::bad_request(&message),
        };

        let mut cafes = Vec::new();
        for cafe in self.directory.cafes(region) {
            let status = self
                .formatter
                .describe_status_at(cafe, &*clock, region.timezone());
            let status = match status {
                Ok(status) => Some(status),
                Err(err @ StatusError::ClockUnavailable(_)) => {
                    error!(%err, "Could not read clock");
                    return Self::unavailable(&err.to_string());
                }
                Err(err) => {
                    warn!(cafe = %cafe.name, %err, "Hours unavailable");
                    None
                }
            };
            cafes.push(CafeSummary::new(cafe, status));
        }
        Self::ok_data(CafeList::new(region, cafes))
    }

    /// The /api/cafe API endpoint.
    ///
    /// Takes a required `region`, a required `name` (case insensitive) and an
    /// optional `at`. Returns the full detail model for that cafe, 404 if
    /// there is no such cafe.
    fn cafe_detail(&self, query: Option<&str>) -> Result<Response<Full<Bytes>>, hyper::Error> {
        let Some(params) = query else {
            return Self::bad_request(
                "Parameters not provided. Required region + Required name + Optional at.",
            );
        };
        let Some(map) = Self::parse_params(params) else {
            return Self::bad_request("Malformed Parameters.");
        };
        let region = match self.region_param(&map) {
            Ok(region) => region,
            Err(message) => return Self::bad_request(&message),
        };
        let Some(name) = map.get("name") else {
            return Self::bad_request("name not provided.");
        };
        let clock = match self.request_clock(region, &map) {
            Ok(clock) => clock,
            Err(message) => return Self::bad_request(&message),
        };

        let Some(cafe) = self.directory.find(region, name) else {
            return Self::not_found("Cafe not found.");
        };

        match CafeDetail::build(&self.formatter, region, cafe, &*clock) {
            Ok(detail) => Self::ok_data(detail),
            Err(err) => {
                error!(cafe = %cafe.name, %err, "Could not build cafe detail");
                Self::unavailable(&err.to_string())
            }
        }
    }

    /// Dispatches a request by method and path.
    pub fn route(
        &self,
        method: &Method,
        path: &str,
        query: Option<&str>,
    ) -> Result<Response<Full<Bytes>>, hyper::Error> {
        debug!(%method, path, "Request");
        match method {
            &Method::GET => match path {
                "/api/cafes" => self.cafe_list(query),
                "/api/cafe" => self.cafe_detail(query),
                _ => Self::not_found(""),
            },
            _ => Self::not_found(""),
        }
    }

    fn json(status: StatusCode, body: Bytes) -> Result<Response<Full<Bytes>>, hyper::Error> {
        let mut res = Response::new(Full::new(body));
        *res.status_mut() = status;
        res.headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(res)
    }

    fn error_body(message: &str) -> Bytes {
        Bytes::from(serde_json::json!({ "error": message }).to_string())
    }

    /// Return a 200 OK response with the data provided.
    fn ok_data<T: Serialize>(body: T) -> Result<Response<Full<Bytes>>, hyper::Error> {
        match serde_json::to_string(&body) {
            Ok(data) => Self::json(StatusCode::OK, Bytes::from(data)),
            Err(err) => Self::server_error(&err.to_string()),
        }
    }

    /// Return a 500 Internal Server Error response with the message provided.
    fn server_error(message: &str) -> Result<Response<Full<Bytes>>, hyper::Error> {
        Self::json(StatusCode::INTERNAL_SERVER_ERROR, Self::error_body(message))
    }

    /// Return a 503 Service Unavailable response with the message provided.
    fn unavailable(message: &str) -> Result<Response<Full<Bytes>>, hyper::Error> {
        Self::json(StatusCode::SERVICE_UNAVAILABLE, Self::error_body(message))
    }

    /// Return a 404 Not Found response with the message provided. The message here is optional.
    /// Leave it empty for no message.
    fn not_found(message: &str) -> Result<Response<Full<Bytes>>, hyper::Error> {
        let body = if message.is_empty() {
            Bytes::new()
        } else {
            Self::error_body(message)
        };
        Self::json(StatusCode::NOT_FOUND, body)
    }

    /// Return a 400 Bad Request response with the message provided.
    fn bad_request(message: &str) -> Result<Response<Full<Bytes>>, hyper::Error> {
        Self::json(StatusCode::BAD_REQUEST, Self::error_body(message))
    }
}

impl Service<Request<Incoming>> for Server {
    type Response = Response<Full<Bytes>>;
    type Error = hyper::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn call(&self, req: Request<Incoming>) -> Self::Future {
        let res = self.route(req.method(), req.uri().path(), req.uri().query());
        Box::pin(async { res })
    }
}
