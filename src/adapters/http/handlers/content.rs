use actix_web::{HttpResponse, web};
use std::sync::Arc;
use validator::Validate;

use crate::adapters::http::dtos::{
  DestroyContentRequest, StatusResponse, StoreContentRequest, UpdateContentRequest,
  UpdatedContentResponse,
};
use crate::adapters::http::errors::ApiError;
use crate::application::content::ContentService;

/// GET /content/{slug}
pub async fn get_content_handler(
  slug: web::Path<String>,
  service: web::Data<Arc<ContentService>>,
) -> Result<HttpResponse, ApiError> {
  let item = service.get_by_slug(&slug).await?;
  Ok(HttpResponse::Ok().json(item))
}

/// POST /content/store — protected; acknowledges without echoing the body
pub async fn store_content_handler(
  request: web::Json<StoreContentRequest>,
  service: web::Data<Arc<ContentService>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  let request = request.into_inner();
  service.create(request.title, request.description).await?;

  Ok(HttpResponse::Ok().json(StatusResponse::success()))
}

/// PUT /content/update — protected; echoes the updated resource
pub async fn update_content_handler(
  request: web::Json<UpdateContentRequest>,
  service: web::Data<Arc<ContentService>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  let request = request.into_inner();
  let updated = service
    .update(request.id, request.title, request.description)
    .await?;

  Ok(HttpResponse::Ok().json(UpdatedContentResponse::new(updated)))
}

/// DELETE /content/destroy — protected
pub async fn destroy_content_handler(
  request: web::Json<DestroyContentRequest>,
  service: web::Data<Arc<ContentService>>,
) -> Result<HttpResponse, ApiError> {
  service.delete(request.id).await?;
  Ok(HttpResponse::Ok().json(StatusResponse::success()))
}
