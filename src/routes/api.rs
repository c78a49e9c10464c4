//! Query/mutation function calls
//!
//! Every service function is reachable as `POST /api/{module}/{function}`
//! with a JSON argument record (camelCase). An empty body is `{}`.
//!
//! | module         | functions                                                      |
//! |----------------|----------------------------------------------------------------|
//! | `products`     | getProducts, getProductBySlug, getProductById, create/update/deleteProduct |
//! | `blogPosts`    | getBlogPosts, getBlogPostBySlug, getBlogPostById, create/update/deleteBlogPost |
//! | `pages`        | getPages, getPageBySlug, getPageById, create/update/deletePage |
//! | `industries`   | getIndustries, getIndustryById, getIndustryByStringId, create/update/deleteIndustry |
//! | `inquiries`    | createInquiry, getInquiries, getInquiryById, updateInquiryStatus, deleteInquiry |
//! | `siteSettings` | getSetting, getSettings, setSetting                            |
//! | `seed`         | seedDemoData, clearAllData                                     |

use bytes::Bytes;
use http_body_util::Full;
use hyper::{Response, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, error, warn};

use super::{error_response, json_response};
use crate::db::schemas::InquiryStatus;
use crate::services::ContentService;
use crate::types::{CmsError, DocId, Result};

/// Split `/api/{module}/{function}` into its two segments
pub fn parse_function_route(path: &str) -> Option<(&str, &str)> {
    let rest = path.strip_prefix("/api/")?;
    let (module, function) = rest.split_once('/')?;
    if module.is_empty() || function.is_empty() || function.contains('/') {
        return None;
    }
    Some((module, function))
}

/// Run one function and render its result
pub async fn handle_function_call(
    service: &ContentService,
    module: &str,
    function: &str,
    body: &[u8],
) -> Response<Full<Bytes>> {
    let args = match parse_body(body) {
        Ok(args) => args,
        Err(e) => return error_response(&e),
    };

    match call(service, module, function, args).await {
        Ok(value) => json_response(StatusCode::OK, &value),
        Err(e) => {
            if e.status_code().is_server_error() {
                error!("{}.{} failed: {}", module, function, e);
            } else {
                warn!("{}.{} rejected: {}", module, function, e);
            }
            error_response(&e)
        }
    }
}

fn parse_body(body: &[u8]) -> Result<Value> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Map::new()));
    }
    serde_json::from_slice(body).map_err(|e| CmsError::BadRequest(format!("invalid JSON body: {}", e)))
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct SlugArgs {
    slug: String,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct StringIdArgs {
    id: String,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct KeyArgs {
    key: String,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct SetSettingArgs {
    key: String,
    value: Value,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct InquiryStatusArgs {
    inquiry_id: DocId,
    status: InquiryStatus,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct NoArgs {}

fn parse<T: DeserializeOwned>(args: Value) -> Result<T> {
    serde_json::from_value(args).map_err(|e| CmsError::BadRequest(e.to_string()))
}

/// Pull the record id out of an update's arguments, leaving the patch fields
fn split_id(args: Value, key: &str) -> Result<(DocId, Value)> {
    let Value::Object(mut fields) = args else {
        return Err(CmsError::BadRequest("arguments must be an object".to_string()));
    };
    match fields.remove(key) {
        Some(Value::String(id)) => Ok((DocId::from(id), Value::Object(fields))),
        Some(_) => Err(CmsError::BadRequest(format!("`{}` must be a string", key))),
        None => Err(CmsError::BadRequest(format!("missing field `{}`", key))),
    }
}

/// Arguments that are exactly `{ <key>: id }`
fn only_id(args: Value, key: &str) -> Result<DocId> {
    let (id, rest) = split_id(args, key)?;
    let _: NoArgs = parse(rest)?;
    Ok(id)
}

fn to_json<T: Serialize>(value: T) -> Result<Value> {
    Ok(serde_json::to_value(value)?)
}

async fn call(service: &ContentService, module: &str, function: &str, args: Value) -> Result<Value> {
    debug!("call {}.{}", module, function);
    match (module, function) {
        // Products
        ("products", "getProducts") => to_json(service.get_products(&parse(args)?).await?),
        ("products", "getProductBySlug") => {
            let SlugArgs { slug } = parse(args)?;
            to_json(service.get_product_by_slug(&slug).await?)
        }
        ("products", "getProductById") => {
            to_json(service.get_product_by_id(&only_id(args, "productId")?).await?)
        }
        ("products", "createProduct") => to_json(service.create_product(parse(args)?).await?),
        ("products", "updateProduct") => {
            let (id, patch) = split_id(args, "productId")?;
            to_json(service.update_product(&id, parse(patch)?).await?)
        }
        ("products", "deleteProduct") => {
            to_json(service.delete_product(&only_id(args, "productId")?).await?)
        }

        // Blog posts
        ("blogPosts", "getBlogPosts") => to_json(service.get_blog_posts(&parse(args)?).await?),
        ("blogPosts", "getBlogPostBySlug") => {
            let SlugArgs { slug } = parse(args)?;
            to_json(service.get_blog_post_by_slug(&slug).await?)
        }
        ("blogPosts", "getBlogPostById") => {
            to_json(service.get_blog_post_by_id(&only_id(args, "postId")?).await?)
        }
        ("blogPosts", "createBlogPost") => to_json(service.create_blog_post(parse(args)?).await?),
        ("blogPosts", "updateBlogPost") => {
            let (id, patch) = split_id(args, "postId")?;
            to_json(service.update_blog_post(&id, parse(patch)?).await?)
        }
        ("blogPosts", "deleteBlogPost") => {
            to_json(service.delete_blog_post(&only_id(args, "postId")?).await?)
        }

        // Pages
        ("pages", "getPages") => to_json(service.get_pages(&parse(args)?).await?),
        ("pages", "getPageBySlug") => {
            let SlugArgs { slug } = parse(args)?;
            to_json(service.get_page_by_slug(&slug).await?)
        }
        ("pages", "getPageById") => to_json(service.get_page_by_id(&only_id(args, "pageId")?).await?),
        ("pages", "createPage") => to_json(service.create_page(parse(args)?).await?),
        ("pages", "updatePage") => {
            let (id, patch) = split_id(args, "pageId")?;
            to_json(service.update_page(&id, parse(patch)?).await?)
        }
        ("pages", "deletePage") => to_json(service.delete_page(&only_id(args, "pageId")?).await?),

        // Industries
        ("industries", "getIndustries") => to_json(service.get_industries(&parse(args)?).await?),
        ("industries", "getIndustryById") => {
            to_json(service.get_industry_by_id(&only_id(args, "industryId")?).await?)
        }
        ("industries", "getIndustryByStringId") => {
            let StringIdArgs { id } = parse(args)?;
            to_json(service.get_industry_by_string_id(&id).await?)
        }
        ("industries", "createIndustry") => to_json(service.create_industry(parse(args)?).await?),
        ("industries", "updateIndustry") => {
            let (id, patch) = split_id(args, "industryId")?;
            to_json(service.update_industry(&id, parse(patch)?).await?)
        }
        ("industries", "deleteIndustry") => {
            to_json(service.delete_industry(&only_id(args, "industryId")?).await?)
        }

        // Inquiries
        ("inquiries", "createInquiry") => to_json(service.create_inquiry(parse(args)?).await?),
        ("inquiries", "getInquiries") => to_json(service.get_inquiries(&parse(args)?).await?),
        ("inquiries", "getInquiryById") => {
            to_json(service.get_inquiry_by_id(&only_id(args, "inquiryId")?).await?)
        }
        ("inquiries", "updateInquiryStatus") => {
            let InquiryStatusArgs { inquiry_id, status } = parse(args)?;
            service.update_inquiry_status(&inquiry_id, status).await?;
            Ok(Value::Null)
        }
        ("inquiries", "deleteInquiry") => {
            to_json(service.delete_inquiry(&only_id(args, "inquiryId")?).await?)
        }

        // Site settings
        ("siteSettings", "getSetting") => {
            let KeyArgs { key } = parse(args)?;
            to_json(service.get_setting(&key).await?)
        }
        ("siteSettings", "getSettings") => {
            let NoArgs {} = parse(args)?;
            to_json(service.get_settings().await?)
        }
        ("siteSettings", "setSetting") => {
            let SetSettingArgs { key, value } = parse(args)?;
            to_json(service.set_setting(&key, value).await?)
        }

        // Seed
        ("seed", "seedDemoData") => {
            let NoArgs {} = parse(args)?;
            to_json(service.seed_demo_data().await?)
        }
        ("seed", "clearAllData") => {
            let NoArgs {} = parse(args)?;
            to_json(service.clear_all_data().await?)
        }

        _ => Err(CmsError::NotFound(format!("function {}.{}", module, function))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use serde_json::json;

    async fn invoke(service: &ContentService, module: &str, function: &str, args: Value) -> (StatusCode, Value) {
        let body = serde_json::to_vec(&args).unwrap();
        let response = handle_function_call(service, module, function, &body).await;
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn page_args(slug: &str) -> Value {
        json!({
            "title": "Quality",
            "slug": slug,
            "type": "quality",
            "status": "active"
        })
    }

    #[test]
    fn test_parse_function_route() {
        assert_eq!(
            parse_function_route("/api/products/getProducts"),
            Some(("products", "getProducts"))
        );
        assert_eq!(parse_function_route("/api/products"), None);
        assert_eq!(parse_function_route("/api/products/a/b"), None);
        assert_eq!(parse_function_route("/health"), None);
    }

    #[tokio::test]
    async fn test_create_get_update_delete_page() {
        let service = ContentService::memory();

        let (status, id) = invoke(&service, "pages", "createPage", page_args("quality")).await;
        assert_eq!(status, StatusCode::OK);
        let id = id.as_str().unwrap().to_string();

        let (_, page) = invoke(&service, "pages", "getPageById", json!({ "pageId": id })).await;
        assert_eq!(page["type"], "quality");
        assert_eq!(page["_id"], id.as_str());

        let (status, _) = invoke(
            &service,
            "pages",
            "updatePage",
            json!({ "pageId": id, "status": "archived" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (_, deleted) = invoke(&service, "pages", "deletePage", json!({ "pageId": id })).await;
        assert_eq!(deleted, json!(true));

        let (_, gone) = invoke(&service, "pages", "getPageById", json!({ "pageId": id })).await;
        assert_eq!(gone, Value::Null);
    }

    #[tokio::test]
    async fn test_argument_shape_errors_are_bad_requests() {
        let service = ContentService::memory();

        let (status, body) = invoke(
            &service,
            "products",
            "getProducts",
            json!({ "status": "retired" }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "BAD_REQUEST");

        let (status, _) = invoke(
            &service,
            "pages",
            "updatePage",
            json!({ "pageId": "x", "colour": "red" }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = invoke(&service, "pages", "getPageById", json!({})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_duplicate_slug_and_missing_record() {
        let service = ContentService::memory();
        invoke(&service, "pages", "createPage", page_args("quality")).await;

        let (status, body) = invoke(&service, "pages", "createPage", page_args("quality")).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["code"], "CONFLICT");

        let (status, _) = invoke(
            &service,
            "pages",
            "updatePage",
            json!({ "pageId": "missing", "title": "x" }),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_out_of_range_setting_value_is_bad_request() {
        let service = ContentService::memory();
        let (status, body) = invoke(
            &service,
            "siteSettings",
            "setSetting",
            json!({ "key": "visits", "value": u64::MAX }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn test_unknown_function_and_empty_body() {
        let service = ContentService::memory();
        let (status, _) = invoke(&service, "products", "explode", json!({})).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let response = handle_function_call(&service, "products", "getProducts", b"").await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_inquiry_status_update_returns_null() {
        let service = ContentService::memory();
        let (_, id) = invoke(
            &service,
            "inquiries",
            "createInquiry",
            json!({ "name": "Ada", "email": "ada@example.com", "message": "Hi" }),
        )
        .await;

        let (status, body) = invoke(
            &service,
            "inquiries",
            "updateInquiryStatus",
            json!({ "inquiryId": id, "status": "qualified" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, Value::Null);

        let (_, listed) = invoke(
            &service,
            "inquiries",
            "getInquiries",
            json!({ "status": "qualified" }),
        )
        .await;
        assert_eq!(listed.as_array().unwrap().len(), 1);
    }
}
