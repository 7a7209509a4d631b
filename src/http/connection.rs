use std::sync::Arc;

use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, error, info, warn};

use crate::config::SiteConfig;
use crate::http::parser::{parse_request, ParseError};
use crate::http::path::{self, ResolveError};
use crate::http::request::Request;
use crate::http::resource::{self, Resource, ResourceError};
use crate::http::response::Response;
use crate::http::status::StatusCode;
use crate::http::writer::ResponseWriter;

/// Anything that can stop a request from being served as a plain 200.
#[derive(Debug, thiserror::Error)]
pub enum ServeError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error(transparent)]
    Resource(#[from] ResourceError),
}

impl ServeError {
    /// The one place failures become status codes.
    pub fn status(&self) -> StatusCode {
        match self {
            ServeError::Parse(_) => StatusCode::BadRequest,
            ServeError::Resolve(ResolveError::TraversalRejected(_)) => StatusCode::Forbidden,
            ServeError::Resolve(ResolveError::UnrepresentablePath(_)) => StatusCode::BadRequest,
            ServeError::Resource(ResourceError::ResourceNotFound(_)) => StatusCode::NotFound,
            ServeError::Resource(ResourceError::ResourceUnreadable { .. }) => {
                StatusCode::InternalServerError
            }
        }
    }
}

/// The closed set of ways a connection can be answered.
#[derive(Debug)]
pub enum Reply {
    /// 200 with the loaded file
    Resource(Resource),
    /// 404 with the site's not-found page, or a plain fallback
    NotFoundPage,
    /// Plain-text error body for the given status
    Error(StatusCode),
}

/// Picks the reply for the outcome of serving a request.
pub fn select_reply(outcome: Result<Resource, ServeError>) -> Reply {
    match outcome {
        Ok(resource) => Reply::Resource(resource),
        Err(ServeError::Resource(ResourceError::ResourceNotFound(_))) => Reply::NotFoundPage,
        Err(e) => Reply::Error(e.status()),
    }
}

pub struct Connection<S> {
    reader: BufReader<S>,
    site: Arc<SiteConfig>,
    state: ConnectionState,
}

pub enum ConnectionState {
    Reading,
    Parsed(Request),
    Resolving(Request),
    Responding(ResponseWriter),
    Closed,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, site: Arc<SiteConfig>) -> Self {
        Self {
            reader: BufReader::new(stream),
            site,
            state: ConnectionState::Reading,
        }
    }

    /// Drives the connection from the first byte read to close. Exactly one
    /// response is written, whatever the outcome.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match std::mem::replace(&mut self.state, ConnectionState::Closed) {
                ConnectionState::Reading => {
                    self.state = match parse_request(&mut self.reader).await {
                        Ok(req) => ConnectionState::Parsed(req),
                        Err(e) => {
                            warn!(error = %e, "Rejecting unparsable request");
                            let response = self.render(select_reply(Err(e.into()))).await;
                            ConnectionState::Responding(ResponseWriter::new(&response))
                        }
                    };
                }

                ConnectionState::Parsed(req) => {
                    debug!(
                        method = %req.method,
                        path = %req.path,
                        version = %req.version,
                        body_len = req.body.len(),
                        "Request parsed"
                    );
                    self.state = ConnectionState::Resolving(req);
                }

                ConnectionState::Resolving(req) => {
                    let outcome = self.serve(&req).await;
                    if let Err(e) = &outcome {
                        match e.status() {
                            StatusCode::InternalServerError => error!(error = %e, "Failed to serve request"),
                            StatusCode::NotFound => debug!(error = %e, "Resource missing"),
                            _ => warn!(error = %e, path = %req.path, "Rejecting request"),
                        }
                    }

                    let response = self.render(select_reply(outcome)).await;
                    info!(
                        method = %req.method,
                        path = %req.path,
                        status = %response.status,
                        bytes = response.body.len(),
                        "Request served"
                    );

                    let writer = if req.is_head() {
                        ResponseWriter::head_only(&response)
                    } else {
                        ResponseWriter::new(&response)
                    };
                    self.state = ConnectionState::Responding(writer);
                }

                ConnectionState::Responding(mut writer) => {
                    writer.write_to_stream(self.reader.get_mut()).await?;

                    if let Err(e) = self.reader.get_mut().shutdown().await {
                        debug!(error = %e, "Shutdown after response failed");
                    }
                    self.state = ConnectionState::Closed;
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        Ok(())
    }

    async fn serve(&self, req: &Request) -> Result<Resource, ServeError> {
        let resolved = path::resolve(&req.path, &self.site.document_root)?;
        debug!(resolved = %resolved.display(), "Path resolved");

        let target = resource::locate(&resolved, &self.site.index_file).await?;
        let resource = resource::load(&target).await?;
        debug!(file = %resource.path.display(), content_type = resource.content_type, "Serving file");
        Ok(resource)
    }

    async fn render(&self, reply: Reply) -> Response {
        match reply {
            Reply::Resource(res) => Response::build(res.content_type, res.body, StatusCode::Ok.as_str()),
            Reply::NotFoundPage => self.not_found().await,
            Reply::Error(status) => Response::plain(status),
        }
    }

    /// Serves the site's not-found page with 404 when it exists.
    async fn not_found(&self) -> Response {
        let page = self.site.not_found_path();
        if !tokio::fs::try_exists(&page).await.unwrap_or(false) {
            return Response::plain(StatusCode::NotFound);
        }

        match resource::load(&page).await {
            Ok(res) => Response::build(res.content_type, res.body, StatusCode::NotFound.as_str()),
            Err(e) => {
                error!(error = %e, "Failed to read not-found page");
                Response::plain(StatusCode::InternalServerError)
            }
        }
    }
}
