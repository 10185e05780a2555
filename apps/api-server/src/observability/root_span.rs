//! Root span for `TracingLogger` carrying the service name.

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::{Error, web};
use tracing::Span;
use tracing_actix_web::{DefaultRootSpanBuilder, RootSpanBuilder, root_span};

/// Service name registered as app data, e.g. `Page-Turner-Pro-staging`.
#[derive(Debug, Clone)]
pub struct ServiceName(pub String);

/// Default request span plus a `service` field.
pub struct ServiceRootSpan;

impl RootSpanBuilder for ServiceRootSpan {
    fn on_request_start(request: &ServiceRequest) -> Span {
        let service = request
            .app_data::<web::Data<ServiceName>>()
            .map(|name| name.0.clone())
            .unwrap_or_default();
        root_span!(request, service = %service)
    }

    fn on_request_end<B: MessageBody>(span: Span, outcome: &Result<ServiceResponse<B>, Error>) {
        DefaultRootSpanBuilder::on_request_end(span, outcome);
    }
}
