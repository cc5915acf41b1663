//! HTTP adapter over `tiny_http`.
//!
//! [`respond`] turns a rendered feed into a response. [`FeedServer`] serves a
//! feed definition file, reloading it on every request:
//!
//! | Path         | Format                                      |
//! |--------------|---------------------------------------------|
//! | `/feed`      | `?format=`, then `Accept`, then RSS         |
//! | `/feed.xml`  | RSS                                         |
//! | `/feed.rss`  | RSS                                         |
//! | `/feed.atom` | Atom                                        |

use crate::{
    config::FeedDefinition,
    date::SystemClock,
    debug, log,
    model::Feed,
    render::FeedFormat,
};
use anyhow::{Context, Result};
use std::{
    net::{IpAddr, SocketAddr},
    path::{Path, PathBuf},
};
use tiny_http::{Header, Method, Request, Response, Server, StatusCode};

/// Maximum number of port binding attempts.
const MAX_PORT_RETRIES: u16 = 10;

const CACHE_CONTROL: &str = "public, max-age=3600";
const PLAIN: &str = "text/plain; charset=utf-8";

// ============================================================================
// Responses
// ============================================================================

/// Render `feed` as `format` and answer `request`.
///
/// Render failures become a 500 with the error message as plain text.
pub fn respond(request: Request, feed: &Feed, format: FeedFormat) -> Result<()> {
    let body = match feed.render(format) {
        Ok(body) => body,
        Err(err) => return respond_error(request, &err.to_string()),
    };

    if is_head_request(&request) {
        return send_head(request, 200, format.content_type());
    }
    send_body(request, 200, format.content_type(), body)
}

fn respond_error(request: Request, message: &str) -> Result<()> {
    if is_head_request(&request) {
        let response =
            Response::empty(StatusCode(500)).with_header(make_header("Content-Type", PLAIN));
        request.respond(response)?;
        return Ok(());
    }
    let response = Response::from_data(message.as_bytes().to_vec())
        .with_status_code(StatusCode(500))
        .with_header(make_header("Content-Type", PLAIN));
    request.respond(response)?;
    Ok(())
}

fn respond_not_found(request: Request) -> Result<()> {
    let response = Response::from_data(b"404 Not Found".to_vec())
        .with_status_code(StatusCode(404))
        .with_header(make_header("Content-Type", PLAIN));
    request.respond(response)?;
    Ok(())
}

fn is_head_request(request: &Request) -> bool {
    request.method() == &Method::Head
}

fn send_head(request: Request, status: u16, content_type: &'static str) -> Result<()> {
    let response = Response::empty(StatusCode(status))
        .with_header(make_header("Content-Type", content_type))
        .with_header(make_header("Cache-Control", CACHE_CONTROL));
    request.respond(response)?;
    Ok(())
}

fn send_body(
    request: Request,
    status: u16,
    content_type: &'static str,
    body: Vec<u8>,
) -> Result<()> {
    let response = Response::from_data(body)
        .with_status_code(StatusCode(status))
        .with_header(make_header("Content-Type", content_type))
        .with_header(make_header("Cache-Control", CACHE_CONTROL));
    request.respond(response)?;
    Ok(())
}

fn make_header(key: &'static str, value: &'static str) -> Header {
    Header::from_bytes(key, value).unwrap()
}

// ============================================================================
// Routing
// ============================================================================

/// What a request path asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// `/feed`: format chosen per request.
    Negotiate,
    Fixed(FeedFormat),
    NotFound,
}

pub fn route(path: &str) -> Route {
    match path.trim_end_matches('/') {
        "/feed" => Route::Negotiate,
        "/feed.xml" | "/feed.rss" => Route::Fixed(FeedFormat::Rss),
        "/feed.atom" => Route::Fixed(FeedFormat::Atom),
        _ => Route::NotFound,
    }
}

/// Pick a format: an explicit `?format=` wins, then a feed `Accept` type,
/// then RSS.
pub fn negotiate(query_format: Option<&str>, accept: Option<&str>) -> FeedFormat {
    if query_format.is_some() {
        return FeedFormat::from_query(query_format);
    }
    accept
        .and_then(FeedFormat::from_accept)
        .unwrap_or_default()
}

/// Split a request target into path and query string.
fn split_url(url: &str) -> (&str, Option<&str>) {
    match url.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (url, None),
    }
}

/// First value of `key` in a query string. No percent-decoding.
fn query_param<'a>(query: &'a str, key: &str) -> Option<&'a str> {
    query
        .split('&')
        .filter_map(|pair| pair.split_once('=').or(Some((pair, ""))))
        .find(|(k, _)| *k == key)
        .map(|(_, v)| v)
}

fn header_value<'a>(request: &'a Request, name: &str) -> Option<&'a str> {
    request
        .headers()
        .iter()
        .find(|h| h.field.as_str().as_str().eq_ignore_ascii_case(name))
        .map(|h| h.value.as_str())
}

// ============================================================================
// Server
// ============================================================================

/// Serves one feed definition file.
pub struct FeedServer {
    server: Server,
    addr: SocketAddr,
    definition: PathBuf,
}

impl FeedServer {
    /// Bind to `interface:port`, trying the following ports if it is taken.
    pub fn bind(interface: IpAddr, port: u16, definition: impl Into<PathBuf>) -> Result<Self> {
        let (server, addr) = bind_with_retry(interface, port)?;
        Ok(Self {
            server,
            addr,
            definition: definition.into(),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn definition(&self) -> &Path {
        &self.definition
    }

    /// Handle requests until the listener closes.
    pub fn run(&self) -> Result<()> {
        for request in self.server.incoming_requests() {
            if let Err(err) = self.handle(request) {
                log!("error"; "{err:#}");
            }
        }
        Ok(())
    }

    fn handle(&self, request: Request) -> Result<()> {
        let (path, query) = split_url(request.url());
        debug!("serve"; "{} {}", request.method(), request.url());

        let format = match route(path) {
            Route::NotFound => return respond_not_found(request),
            Route::Fixed(format) => format,
            Route::Negotiate => negotiate(
                query.and_then(|q| query_param(q, "format")),
                header_value(&request, "Accept"),
            ),
        };

        match self.load() {
            Ok(feed) => respond(request, &feed, format),
            Err(err) => {
                log!("error"; "{err:#}");
                respond_error(request, &format!("{err:#}"))
            }
        }
    }

    fn load(&self) -> Result<Feed> {
        let definition = FeedDefinition::from_path(&self.definition)
            .with_context(|| format!("Failed to load {}", self.definition.display()))?;
        Ok(definition.into_feed(&SystemClock)?)
    }
}

/// Bind to the specified interface and port, with automatic port retry.
fn bind_with_retry(interface: IpAddr, base_port: u16) -> Result<(Server, SocketAddr)> {
    let mut last_error = None;
    for offset in 0..MAX_PORT_RETRIES {
        let port = base_port.saturating_add(offset);
        let addr = SocketAddr::new(interface, port);

        match Server::http(addr) {
            Ok(server) => {
                if offset > 0 {
                    log!("serve"; "port {} in use, using {} instead", base_port, port);
                }
                // Port 0 resolves to an OS-chosen port.
                let bound = server.server_addr().to_ip().unwrap_or(addr);
                return Ok((server, bound));
            }
            Err(e) => last_error = Some(e),
        }
    }
    Err(anyhow::anyhow!(
        "Failed to bind after {} attempts (ports {}-{}): {}",
        MAX_PORT_RETRIES,
        base_port,
        base_port.saturating_add(MAX_PORT_RETRIES - 1),
        last_error.map(|e| e.to_string()).unwrap_or_default()
    ))
}
