use actix_web::{
  Error,
  body::{BodySize, MessageBody},
  dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use futures_util::future::LocalBoxFuture;
use std::{
  future::{Ready, ready},
  rc::Rc,
  time::Instant,
};
use tracing::Instrument;

/// Access logging middleware.
///
/// Opens one tracing span per request carrying method, path and remote
/// address, and closes it with a structured event carrying status,
/// latency and response body size. Error events emitted while the
/// request is handled (notably by the error reporter) land inside the
/// span, which gives every log record its request context without
/// handlers logging anything themselves.
#[derive(Debug, Clone, Default)]
pub struct AccessLogMiddleware;

impl AccessLogMiddleware {
  pub fn new() -> Self {
    Self
  }
}

impl<S, B> Transform<S, ServiceRequest> for AccessLogMiddleware
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: MessageBody + 'static,
{
  type Response = ServiceResponse<B>;
  type Error = Error;
  type Transform = AccessLogMiddlewareService<S>;
  type InitError = ();
  type Future = Ready<Result<Self::Transform, Self::InitError>>;

  fn new_transform(&self, service: S) -> Self::Future {
    ready(Ok(AccessLogMiddlewareService {
      service: Rc::new(service),
    }))
  }
}

pub struct AccessLogMiddlewareService<S> {
  service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AccessLogMiddlewareService<S>
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: MessageBody + 'static,
{
  type Response = ServiceResponse<B>;
  type Error = Error;
  type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

  forward_ready!(service);

  fn call(&self, req: ServiceRequest) -> Self::Future {
    let service = Rc::clone(&self.service);

    let remote = req
      .connection_info()
      .realip_remote_addr()
      .unwrap_or("-")
      .to_string();
    let span = tracing::info_span!(
      "request",
      method = %req.method(),
      path = %req.path(),
      remote = %remote,
    );

    Box::pin(
      async move {
        tracing::info!("incoming request");
        let started = Instant::now();

        let res = service.call(req).await?;

        let latency_us = started.elapsed().as_micros() as u64;
        let bytes_out = match res.response().body().size() {
          BodySize::Sized(n) => n,
          _ => 0,
        };
        tracing::info!(
          status = res.status().as_u16(),
          latency_us,
          bytes_out,
          "handled request"
        );

        Ok(res)
      }
      .instrument(span),
    )
  }
}
