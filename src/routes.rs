use std::collections::HashMap;
use std::str::FromStr;

use flexion_extract::{
    ConjugationRecord, ExtractOptions, Extractor, OutputFormat, PronounStrip, TableScan,
    encode_verb, render,
};
use worker::{Context, Env, Request, Response, RouteContext, Router};

use crate::error::ApiError;
use crate::models::{CONJUGATION_PATH, ErrorResponse, LEGACY_PATH};
use crate::source_scraper;

pub const CORS_HEADERS: [(&str, &str); 3] = [
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Methods", "GET, OPTIONS"),
    ("Access-Control-Allow-Headers", "Content-Type"),
];
const DIAGNOSTIC_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

#[derive(Debug, Clone)]
pub struct AppState {
    pub options: ExtractOptions,
    pub strict_params: bool,
    pub csv_header: bool,
}

impl AppState {
    pub fn from_vars<F>(lookup: F) -> Result<Self, ApiError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut options = ExtractOptions::default();
        if let Some(source_url) = lookup("SOURCE_URL") {
            options.source_url = source_url;
        }
        if let Some(section_id) = lookup("SECTION_ID") {
            options.section_id = section_id;
        }
        if let Some(raw) = lookup("MIN_CELLS") {
            options.min_cells = raw
                .trim()
                .parse()
                .map_err(|error| ApiError::Config(format!("invalid MIN_CELLS '{raw}': {error}")))?;
        }
        if let Some(raw) = lookup("COLLAPSE_LEADING_COLUMN") {
            options.collapse_leading_column = is_truthy(&raw);
        }
        if let Some(raw) = lookup("PRONOUN_STRIP") {
            options.pronoun_strip = PronounStrip::from_str(&raw).map_err(ApiError::Config)?;
        }
        if let Some(raw) = lookup("TABLE_SCAN") {
            options.table_scan = TableScan::from_str(&raw).map_err(ApiError::Config)?;
        }
        Extractor::new(options.clone())?;

        Ok(Self {
            options,
            strict_params: lookup("STRICT_PARAMS").is_some_and(|value| is_truthy(&value)),
            csv_header: lookup("CSV_HEADER").is_some_and(|value| is_truthy(&value)),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConjugationQuery {
    pub verb: String,
    pub format: OutputFormat,
    pub header: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorReply {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
}

pub async fn handle(req: Request, env: Env, _ctx: Context) -> worker::Result<Response> {
    let state = match AppState::from_vars(|name| env.var(name).ok().map(|value| value.to_string()))
    {
        Ok(state) => state,
        Err(error) => {
            worker::console_error!("invalid worker configuration: {error}");
            return with_cors(error.into_response()?);
        }
    };

    Router::with_data(state)
        .get_async(CONJUGATION_PATH, conjugation_route)
        .get_async(LEGACY_PATH, conjugation_route)
        .options(CONJUGATION_PATH, preflight_route)
        .options(LEGACY_PATH, preflight_route)
        .run(req, env)
        .await
}

async fn conjugation_route(req: Request, ctx: RouteContext<AppState>) -> worker::Result<Response> {
    let response = match conjugation_response(&req, &ctx.data).await {
        Ok(response) => response,
        Err(error) => match error_reply(&error, ctx.data.strict_params) {
            Ok(reply) => reply_response(reply)?,
            Err(render_error) => render_error.into_response()?,
        },
    };
    with_cors(response)
}

fn preflight_route(_req: Request, _ctx: RouteContext<AppState>) -> worker::Result<Response> {
    with_cors(Response::empty()?.with_status(204))
}

async fn conjugation_response(req: &Request, state: &AppState) -> Result<Response, ApiError> {
    let query = parse_query(req)?;
    let params = parse_conjugation_query(&query, state.csv_header)?;
    let extractor = Extractor::new(state.options.clone())?;

    let extraction = source_scraper::scrape_conjugations(&extractor, &params.verb).await;
    let body = render_body(&extraction.records, params.format, params.header)?;

    let mut response = Response::ok(body)?;
    let headers = response.headers_mut();
    headers.set("Content-Type", params.format.content_type())?;
    headers.set("Cache-Control", "no-store")?;
    headers.set("X-Record-Count", &extraction.records.len().to_string())?;
    headers.set("X-Extract-Status", extraction.status_code())?;
    if params.format == OutputFormat::Csv {
        headers.set(
            "Content-Disposition",
            &format!(
                "inline; filename=\"conjugation-{}.csv\"",
                encode_verb(&params.verb.to_lowercase())
            ),
        )?;
    }
    Ok(response)
}

// Lenient mode answers parameter errors with a plain 200 diagnostic.
pub fn error_reply(error: &ApiError, strict_params: bool) -> Result<ErrorReply, ApiError> {
    if let (ApiError::BadRequest(message), false) = (error, strict_params) {
        return Ok(ErrorReply {
            status: 200,
            content_type: DIAGNOSTIC_CONTENT_TYPE,
            body: message.clone(),
        });
    }

    let body = serde_json::to_string(&ErrorResponse {
        code: error.code().to_string(),
        message: error.message().to_string(),
    })?;
    Ok(ErrorReply {
        status: error.status_code(),
        content_type: OutputFormat::Json.content_type(),
        body,
    })
}

fn reply_response(reply: ErrorReply) -> worker::Result<Response> {
    let mut response = Response::ok(reply.body)?.with_status(reply.status);
    let headers = response.headers_mut();
    headers.set("Content-Type", reply.content_type)?;
    headers.set("Cache-Control", "no-store")?;
    Ok(response)
}

pub fn with_cors(mut response: Response) -> worker::Result<Response> {
    let headers = response.headers_mut();
    for (name, value) in CORS_HEADERS {
        headers.set(name, value)?;
    }
    Ok(response)
}

fn parse_query(req: &Request) -> Result<HashMap<String, String>, ApiError> {
    let url = req.url()?;
    let query = url
        .query_pairs()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect::<HashMap<_, _>>();
    Ok(query)
}

pub fn parse_conjugation_query(
    query: &HashMap<String, String>,
    default_header: bool,
) -> Result<ConjugationQuery, ApiError> {
    let verb = query
        .get("verb")
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| ApiError::BadRequest("missing required parameter: verb".to_string()))?;

    let format = match query.get("format").or_else(|| query.get("type")) {
        Some(raw) => OutputFormat::from_str(raw).map_err(ApiError::BadRequest)?,
        None => OutputFormat::Json,
    };

    let header = query
        .get("header")
        .map_or(default_header, |value| is_truthy(value));

    Ok(ConjugationQuery {
        verb: verb.to_string(),
        format,
        header,
    })
}

pub fn render_body(
    records: &[ConjugationRecord],
    format: OutputFormat,
    header: bool,
) -> Result<String, ApiError> {
    Ok(render(records, format, header)?)
}

pub fn is_truthy(value: &str) -> bool {
    let lowered = value.trim().to_ascii_lowercase();
    lowered == "true" || lowered == "1" || lowered == "yes"
}
