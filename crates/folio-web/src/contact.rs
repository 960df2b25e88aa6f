#![forbid(unsafe_code)]

//! Contact form: submit handling and the two relay transports.
//!
//! If the page loaded the relay's client library (`window.emailjs`), its
//! `send` method carries the message. Otherwise the relay's REST endpoint is
//! called directly with `fetch`.

use std::cell::RefCell;
use std::rc::Rc;

use folio_core::EffectsConfig;
use folio_core::config::ContactConfig;
use folio_core::contact::{ContactForm, EmailRelay, FormStatus, RelayError, RelayRequest};
use folio_core::lifecycle::{StopSignal, StopTrigger};
use js_sys::{Array, Function, Object, Promise, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Element, FormData, HtmlFormElement, Request, RequestInit, Response, Window};

use crate::dom::{EventListener, Page, Teardown, set_style};

// ---------------------------------------------------------------------------
// Transports
// ---------------------------------------------------------------------------

/// Best-effort text for a rejected JS value.
fn describe(err: &JsValue) -> String {
    if let Some(s) = err.as_string() {
        return s;
    }
    if let Some(e) = err.dyn_ref::<js_sys::Error>() {
        return String::from(e.message());
    }
    js_sys::JSON::stringify(err)
        .ok()
        .and_then(|s| s.as_string())
        .unwrap_or_else(|| "unknown error".to_string())
}

/// Map a client-library rejection (`{ status, text }`) to a relay error.
fn rejection(err: &JsValue) -> RelayError {
    let status = Reflect::get(err, &"status".into())
        .ok()
        .and_then(|v| v.as_f64());
    let text = Reflect::get(err, &"text".into())
        .ok()
        .and_then(|v| v.as_string());
    match (status, text) {
        (Some(status), Some(body)) => RelayError::Rejected {
            status: status as u16,
            body,
        },
        _ => RelayError::Network(describe(err)),
    }
}

/// The relay's browser client library, if loaded.
pub struct ClientLibraryRelay {
    client: JsValue,
}

impl ClientLibraryRelay {
    pub fn detect(window: &Window) -> Option<Self> {
        let client = Reflect::get(window, &"emailjs".into()).ok()?;
        let send = Reflect::get(&client, &"send".into()).ok()?;
        send.is_function().then_some(Self { client })
    }
}

impl EmailRelay for ClientLibraryRelay {
    async fn send(&self, request: &RelayRequest) -> Result<(), RelayError> {
        let send: Function = Reflect::get(&self.client, &"send".into())
            .ok()
            .and_then(|f| f.dyn_into().ok())
            .ok_or(RelayError::Unavailable)?;

        let params = Object::new();
        for (key, value) in &request.template_params {
            Reflect::set(&params, &key.into(), &value.into())
                .map_err(|e| RelayError::Encode(describe(&e)))?;
        }
        let args = Array::new();
        args.push(&request.service_id.as_str().into());
        args.push(&request.template_id.as_str().into());
        args.push(&params);
        if !request.user_id.is_empty() {
            args.push(&request.user_id.as_str().into());
        }

        let pending = send
            .apply(&self.client, &args)
            .map_err(|e| RelayError::Network(describe(&e)))?;
        let promise: Promise = pending
            .dyn_into()
            .map_err(|_| RelayError::Network("send did not return a promise".into()))?;
        JsFuture::from(promise)
            .await
            .map(|_| ())
            .map_err(|e| rejection(&e))
    }
}

/// Direct call to the relay's REST endpoint.
pub struct FetchRelay {
    window: Window,
    endpoint: String,
}

impl FetchRelay {
    pub fn new(window: Window, endpoint: String) -> Self {
        Self { window, endpoint }
    }
}

impl EmailRelay for FetchRelay {
    async fn send(&self, request: &RelayRequest) -> Result<(), RelayError> {
        let body = request.to_json()?;
        let init = RequestInit::new();
        init.set_method("POST");
        init.set_body(&JsValue::from_str(&body));
        let fetch_request = Request::new_with_str_and_init(&self.endpoint, &init)
            .map_err(|e| RelayError::Network(describe(&e)))?;
        fetch_request
            .headers()
            .set("Content-Type", "application/json")
            .map_err(|e| RelayError::Network(describe(&e)))?;

        let response: Response = JsFuture::from(self.window.fetch_with_request(&fetch_request))
            .await
            .map_err(|e| RelayError::Network(describe(&e)))?
            .dyn_into()
            .map_err(|_| RelayError::Network("fetch did not return a Response".into()))?;

        if response.ok() {
            return Ok(());
        }
        let body = match response.text() {
            Ok(text) => JsFuture::from(text)
                .await
                .ok()
                .and_then(|v| v.as_string())
                .unwrap_or_default(),
            Err(_) => String::new(),
        };
        Err(RelayError::Rejected {
            status: response.status(),
            body,
        })
    }
}

/// Whichever transport the page supports.
pub enum PageRelay {
    ClientLibrary(ClientLibraryRelay),
    Fetch(FetchRelay),
}

impl PageRelay {
    pub fn detect(window: &Window, cfg: &ContactConfig) -> Self {
        match ClientLibraryRelay::detect(window) {
            Some(client) => Self::ClientLibrary(client),
            None => Self::Fetch(FetchRelay::new(window.clone(), cfg.endpoint.clone())),
        }
    }
}

impl EmailRelay for PageRelay {
    async fn send(&self, request: &RelayRequest) -> Result<(), RelayError> {
        match self {
            Self::ClientLibrary(relay) => relay.send(request).await,
            Self::Fetch(relay) => relay.send(request).await,
        }
    }
}

// ---------------------------------------------------------------------------
// Form wiring
// ---------------------------------------------------------------------------

/// Text fields of `form` as `(name, value)` pairs. File inputs are skipped.
fn form_fields(form: &HtmlFormElement) -> Result<Vec<(String, String)>, JsValue> {
    let data = FormData::new_with_form(form)?;
    let mut fields = Vec::new();
    let Some(entries) = js_sys::try_iter(&data)? else {
        return Ok(fields);
    };
    for entry in entries {
        let pair: Array = entry?.dyn_into()?;
        if let (Some(name), Some(value)) = (pair.get(0).as_string(), pair.get(1).as_string()) {
            fields.push((name, value));
        }
    }
    Ok(fields)
}

fn render_status(el: Option<&Element>, form: &ContactForm) {
    let Some(el) = el else {
        return;
    };
    el.set_text_content(Some(form.message()));
    el.set_class_name(form.status().class_name());
    if form.status() == FormStatus::Sending {
        let _ = set_style(el, "opacity", "1");
    }
}

struct FormHandle {
    _listener: EventListener,
    _trigger: StopTrigger,
}

pub fn install(page: &Page, cfg: &EffectsConfig, teardown: &mut Teardown) -> Result<bool, JsValue> {
    let Some(form_el) = page
        .by_id(&cfg.selectors.contact_form_id)
        .and_then(|el| el.dyn_into::<HtmlFormElement>().ok())
    else {
        return Ok(false);
    };
    let status_el = page.by_id(&cfg.selectors.form_status_id);
    if status_el.is_none() {
        tracing::debug!(target: "folio::contact", "form status element missing");
    }

    let relay = Rc::new(PageRelay::detect(&page.window, &cfg.contact));
    if matches!(*relay, PageRelay::Fetch(_)) {
        tracing::debug!(target: "folio::contact", "relay client library not loaded, using REST endpoint");
    }
    let state = Rc::new(RefCell::new(ContactForm::new(cfg.contact.clone())));
    let (signal, trigger) = StopSignal::new();

    let form = form_el.clone();
    let listener = EventListener::new(&form_el, "submit", move |event| {
        event.prevent_default();
        let fields = match form_fields(&form) {
            Ok(fields) => fields,
            Err(err) => {
                tracing::warn!(target: "folio::contact", error = ?err, "could not read form fields");
                Vec::new()
            }
        };
        let request = state.borrow_mut().begin(fields);
        render_status(status_el.as_ref(), &state.borrow());

        let relay = Rc::clone(&relay);
        let state = Rc::clone(&state);
        let status_el = status_el.clone();
        let form = form.clone();
        let signal: StopSignal = signal.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let result = relay.send(&request).await;
            if signal.is_stopped() {
                return;
            }
            let outcome = state.borrow_mut().finish(result);
            render_status(status_el.as_ref(), &state.borrow());
            if outcome.reset_fields {
                form.reset();
            }
        });
    })?;

    teardown.hold(FormHandle {
        _listener: listener,
        _trigger: trigger,
    });
    Ok(true)
}
