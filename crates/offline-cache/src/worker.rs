//! Service Worker Entry Point
//!
//! Binds the cache manager to `self.caches`, `fetch` and the worker
//! lifecycle events. Built only for wasm32.

use std::rc::Rc;

use async_trait::async_trait;
use http::header::{HeaderName, HeaderValue, ACCEPT};
use http::{HeaderMap, Method, StatusCode};
use js_sys::{Array, Promise, Uint8Array};
use url::Url;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{future_to_promise, JsFuture};
use web_sys::{
    Cache, ExtendableEvent, ExtendableMessageEvent, FetchEvent, Headers, MessagePort, RequestInit,
    ResponseInit, ResponseType, ServiceWorkerGlobalScope,
};

use crate::error::{CacheError, CacheResult};
use crate::fetch::{FetchOutcome, Request, Response, ResponseKind};
use crate::manager::OfflineCacheManager;
use crate::manifest::CacheManifest;
use crate::message::{MessageAction, WorkerMessage};
use crate::traits::{CacheStorage, Network};

type Manager = OfflineCacheManager<BrowserCaches, BrowserNetwork>;

fn global() -> ServiceWorkerGlobalScope {
    js_sys::global().unchecked_into()
}

fn js_error(context: &str, err: JsValue) -> String {
    format!("{}: {:?}", context, err)
}

// ========================
// Conversions
// ========================

fn copy_headers(from: &Headers) -> HeaderMap {
    let mut headers = HeaderMap::new();
    let Ok(Some(entries)) = js_sys::try_iter(from) else {
        return headers;
    };
    for entry in entries.flatten() {
        let pair: Array = entry.unchecked_into();
        let (Some(name), Some(value)) = (pair.get(0).as_string(), pair.get(1).as_string()) else {
            continue;
        };
        if let (Ok(name), Ok(value)) = (HeaderName::from_bytes(name.as_bytes()), HeaderValue::from_str(&value)) {
            headers.append(name, value);
        }
    }
    headers
}

async fn from_web_response(response: web_sys::Response) -> CacheResult<Response> {
    let status = StatusCode::from_u16(response.status())
        .map_err(|e| CacheError::Network(e.to_string()))?;
    let kind = match response.type_() {
        ResponseType::Basic | ResponseType::Default => ResponseKind::Basic,
        ResponseType::Cors => ResponseKind::Cors,
        ResponseType::Error => ResponseKind::Error,
        _ => ResponseKind::Opaque,
    };

    let headers = copy_headers(&response.headers());
    let buffer = response
        .array_buffer()
        .map_err(|e| CacheError::Network(js_error("array_buffer", e)))?;
    let buffer = JsFuture::from(buffer)
        .await
        .map_err(|e| CacheError::Network(js_error("read body", e)))?;

    let mut converted = Response::new(status, Uint8Array::new(&buffer).to_vec()).with_kind(kind);
    converted.headers = headers;
    Ok(converted)
}

fn to_web_response(response: &Response) -> Result<web_sys::Response, JsValue> {
    let headers = Headers::new()?;
    for (name, value) in response.headers.iter() {
        if let Ok(value) = value.to_str() {
            headers.append(name.as_str(), value)?;
        }
    }
    let init = ResponseInit::new();
    init.set_status(response.status.as_u16());
    init.set_status_text(response.status.canonical_reason().unwrap_or(""));
    init.set_headers(&headers);

    // The constructor throws if a null-body status is given any body
    if response.has_null_body() {
        return web_sys::Response::new_with_opt_u8_array_and_init(None, &init);
    }
    let mut body = response.body.clone();
    web_sys::Response::new_with_opt_u8_array_and_init(Some(body.as_mut_slice()), &init)
}

fn from_web_request(request: &web_sys::Request) -> Option<Request> {
    let url = Url::parse(&request.url()).ok()?;
    let method = Method::from_bytes(request.method().as_bytes()).ok()?;
    let mut converted = Request::new(method, url);
    if let Some(accept) = request.headers().get("accept").ok().flatten() {
        if let Ok(value) = HeaderValue::from_str(&accept) {
            converted.headers.insert(ACCEPT, value);
        }
    }
    Some(converted)
}

// ========================
// Platform Adapters
// ========================

/// `CacheStorage` over the worker's `caches` global
pub struct BrowserCaches {
    caches: web_sys::CacheStorage,
}

impl BrowserCaches {
    fn new(scope: &ServiceWorkerGlobalScope) -> Result<Self, JsValue> {
        Ok(Self { caches: scope.caches()? })
    }

    async fn open(&self, cache_name: &str) -> CacheResult<Cache> {
        JsFuture::from(self.caches.open(cache_name))
            .await
            .map(JsCast::unchecked_into)
            .map_err(|e| CacheError::Storage(js_error("open", e)))
    }
}

async fn await_promise(promise: Promise, context: &str) -> CacheResult<JsValue> {
    JsFuture::from(promise)
        .await
        .map_err(|e| CacheError::Storage(js_error(context, e)))
}

#[async_trait(?Send)]
impl CacheStorage for BrowserCaches {
    async fn keys(&self) -> CacheResult<Vec<String>> {
        let names: Array = await_promise(self.caches.keys(), "keys").await?.unchecked_into();
        Ok(names.iter().filter_map(|name| name.as_string()).collect())
    }

    async fn has(&self, cache_name: &str) -> CacheResult<bool> {
        Ok(await_promise(self.caches.has(cache_name), "has").await?.is_truthy())
    }

    async fn delete(&self, cache_name: &str) -> CacheResult<bool> {
        Ok(await_promise(self.caches.delete(cache_name), "delete").await?.is_truthy())
    }

    async fn match_url(&self, cache_name: &str, url: &Url) -> CacheResult<Option<Response>> {
        let cache = self.open(cache_name).await?;
        let found = await_promise(cache.match_with_str(url.as_str()), "match").await?;
        if found.is_undefined() || found.is_null() {
            return Ok(None);
        }
        from_web_response(found.unchecked_into()).await.map(Some)
    }

    async fn put(&self, cache_name: &str, url: &Url, response: &Response) -> CacheResult<()> {
        let cache = self.open(cache_name).await?;
        let web_response =
            to_web_response(response).map_err(|e| CacheError::Storage(js_error("build response", e)))?;
        await_promise(cache.put_with_str(url.as_str(), &web_response), "put").await?;
        Ok(())
    }
}

/// `Network` over the worker's `fetch`
pub struct BrowserNetwork {
    scope: ServiceWorkerGlobalScope,
}

#[async_trait(?Send)]
impl Network for BrowserNetwork {
    async fn fetch(&self, request: &Request) -> CacheResult<Response> {
        let init = RequestInit::new();
        init.set_method(request.method.as_str());
        let web_request = web_sys::Request::new_with_str_and_init(request.url.as_str(), &init)
            .map_err(|e| CacheError::Network(js_error("build request", e)))?;
        if let Some(accept) = request.headers.get(ACCEPT).and_then(|v| v.to_str().ok()) {
            let _ = web_request.headers().set("accept", accept);
        }

        let response = JsFuture::from(self.scope.fetch_with_request(&web_request))
            .await
            .map_err(|e| CacheError::Network(js_error("fetch", e)))?;
        from_web_response(response.unchecked_into()).await
    }
}

// ========================
// Event Wiring
// ========================

fn build_manager(scope: &ServiceWorkerGlobalScope) -> Result<Manager, JsValue> {
    let scope_url = Url::parse(&scope.registration().scope())
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(OfflineCacheManager::new(
        CacheManifest::default(),
        scope_url,
        BrowserCaches::new(scope)?,
        BrowserNetwork { scope: scope.clone() },
    ))
}

fn on_install(manager: Rc<Manager>, event: ExtendableEvent) {
    let promise = future_to_promise(async move {
        // A rejected waitUntil makes this worker redundant; the previous
        // version keeps serving
        manager
            .install()
            .await
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        JsFuture::from(global().skip_waiting()?).await?;
        Ok(JsValue::UNDEFINED)
    });
    let _ = event.wait_until(&promise);
}

fn on_activate(manager: Rc<Manager>, event: ExtendableEvent) {
    let promise = future_to_promise(async move {
        manager
            .activate()
            .await
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        JsFuture::from(global().clients().claim()).await?;
        Ok(JsValue::UNDEFINED)
    });
    let _ = event.wait_until(&promise);
}

fn on_fetch(manager: Rc<Manager>, event: FetchEvent) {
    let web_request = event.request();
    let Some(request) = from_web_request(&web_request) else {
        return;
    };
    if !manager.should_intercept(&request) {
        return;
    }

    let promise = future_to_promise(async move {
        match manager.handle_fetch(&request).await {
            FetchOutcome::Respond(response, source) => {
                log::debug!("[sw] {} served from {:?}", request.url, source);
                to_web_response(&response).map(JsValue::from)
            }
            FetchOutcome::Passthrough => JsFuture::from(global().fetch_with_request(&web_request)).await,
        }
    });
    let _ = event.respond_with(&promise);
}

fn on_message(manager: Rc<Manager>, event: ExtendableMessageEvent) {
    let message: Option<WorkerMessage> = serde_wasm_bindgen::from_value(event.data()).ok();
    let Some(message) = message else {
        log::debug!("[sw] ignoring unknown message");
        return;
    };

    match manager.handle_message(message) {
        MessageAction::Reply(reply) => {
            let port = event.ports().get(0).dyn_into::<MessagePort>().ok();
            let value = serde_wasm_bindgen::to_value(&reply).ok();
            if let (Some(port), Some(value)) = (port, value) {
                let _ = port.post_message(&value);
            }
        }
        MessageAction::SkipWaiting => {
            let _ = global().skip_waiting();
        }
    }
}

fn listen<E: JsCast + 'static>(
    scope: &ServiceWorkerGlobalScope,
    name: &str,
    manager: &Rc<Manager>,
    handler: fn(Rc<Manager>, E),
) -> Result<(), JsValue> {
    let manager = manager.clone();
    let closure = Closure::<dyn FnMut(JsValue)>::new(move |event: JsValue| {
        handler(manager.clone(), event.unchecked_into());
    });
    scope.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_logger::init_or_ignore(log::Level::Info);

    let scope = global();
    let manager = Rc::new(build_manager(&scope)?);
    log::info!("[sw {}] script loaded", manager.manifest().version);

    listen(&scope, "install", &manager, on_install)?;
    listen(&scope, "activate", &manager, on_activate)?;
    listen(&scope, "fetch", &manager, on_fetch)?;
    listen(&scope, "message", &manager, on_message)?;
    Ok(())
}
