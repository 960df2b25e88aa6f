#![forbid(unsafe_code)]

//! Particle field: capability probe, async GPU setup and the frame loop.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use folio_core::EffectsConfig;
use folio_core::config::ParticleConfig;
use folio_core::css;
use folio_core::lifecycle::{StopSignal, StopTrigger};
use folio_core::particles::{FieldAnimator, ParticleField, PointerOffset};
use js_sys::Reflect;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{HtmlCanvasElement, MouseEvent};

use crate::behavior::Behavior;
use crate::dom::{EventListener, Page, Teardown, set_style, viewport};
use crate::renderer::{PointRenderer, RendererError, surface_size};
use crate::scheduler::FrameLoop;

struct Scene {
    renderer: PointRenderer,
    animator: FieldAnimator,
}

/// Live pieces of a running field, dropped together on teardown.
struct Running {
    _frames: FrameLoop,
    _pointer: EventListener,
    _resize: EventListener,
}

/// Held by the controller. Cancels a pending setup and stops a running field.
struct FieldHandle {
    _trigger: StopTrigger,
    _running: Rc<RefCell<Option<Running>>>,
}

fn webgpu_available(page: &Page) -> bool {
    Reflect::get(&page.window.navigator(), &JsValue::from_str("gpu"))
        .map(|gpu| !gpu.is_undefined() && !gpu.is_null())
        .unwrap_or(false)
}

fn warn_unavailable(reason: &RendererError) {
    tracing::warn!(target: "folio::particles", reason = %reason, "particle field unavailable");
}

fn seed(cfg: &ParticleConfig, page: &Page) -> u64 {
    cfg.seed.unwrap_or_else(|| {
        let now = page.window.performance().map(|p| p.now()).unwrap_or(0.0);
        let wall = web_time::SystemTime::now()
            .duration_since(web_time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos() as u64;
        wall ^ now.to_bits()
    })
}

pub fn install(page: &Page, cfg: &EffectsConfig, teardown: &mut Teardown) -> Result<bool, JsValue> {
    let Some(canvas) = page
        .by_id(&cfg.selectors.particle_canvas_id)
        .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
    else {
        tracing::warn!(target: "folio::particles", "particle canvas missing");
        return Ok(false);
    };
    if !webgpu_available(page) {
        warn_unavailable(&RendererError::Unsupported);
        return Ok(false);
    }

    let particle_cfg = cfg.particles.clone();
    let field = ParticleField::generate(particle_cfg.count, particle_cfg.spread, seed(&particle_cfg, page));

    let (css_w, css_h) = page.viewport();
    let _ = set_style(&canvas, "width", &css::px(css_w));
    let _ = set_style(&canvas, "height", &css::px(css_h));
    let dpr = page.window.device_pixel_ratio();
    let (width, height) = surface_size(css_w, css_h, dpr);

    let (signal, trigger) = StopSignal::new();
    let running = Rc::new(RefCell::new(None));
    let slot = Rc::downgrade(&running);
    let window = page.window.clone();
    let document = page.document.clone();
    let withdrawal = teardown.withdrawal(Behavior::Particles);

    wasm_bindgen_futures::spawn_local(async move {
        let renderer = match PointRenderer::init(canvas.clone(), &field, width, height).await {
            Ok(renderer) => renderer,
            Err(err) => {
                warn_unavailable(&err);
                withdrawal.withdraw();
                return;
            }
        };
        if signal.is_stopped() {
            return;
        }
        let page = Page { window, document };
        match start(&page, canvas, renderer, particle_cfg, css_w, css_h, slot) {
            Ok(points) => tracing::debug!(target: "folio::particles", points, "particle field running"),
            Err(err) => {
                tracing::warn!(target: "folio::particles", error = ?err, "particle field failed to start");
                withdrawal.withdraw();
            }
        }
    });

    teardown.hold(FieldHandle {
        _trigger: trigger,
        _running: running,
    });
    Ok(true)
}

fn start(
    page: &Page,
    canvas: HtmlCanvasElement,
    renderer: PointRenderer,
    cfg: ParticleConfig,
    css_w: f64,
    css_h: f64,
    slot: Weak<RefCell<Option<Running>>>,
) -> Result<u32, JsValue> {
    let Some(slot) = slot.upgrade() else {
        return Ok(0);
    };
    let points = renderer.point_count();
    let aspect = if css_h > 0.0 { (css_w / css_h) as f32 } else { 1.0 };
    let scene = Rc::new(RefCell::new(Scene {
        renderer,
        animator: FieldAnimator::new(cfg, aspect),
    }));

    let frames = {
        let scene = Rc::clone(&scene);
        FrameLoop::start(&page.window, move |now| {
            let mut scene = scene.borrow_mut();
            let uniforms = scene.animator.frame(now);
            if let Err(err) = scene.renderer.render(&uniforms) {
                // Lost or outdated surfaces recover on the next resize.
                tracing::debug!(target: "folio::particles", error = %err, "frame skipped");
            }
            true
        })?
    };

    let pointer = {
        let scene = Rc::clone(&scene);
        let window = page.window.clone();
        EventListener::new(&page.document, "mousemove", move |event| {
            let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            let (w, h) = viewport(&window);
            scene.borrow_mut().animator.set_pointer(PointerOffset::from_client(
                f64::from(mouse.client_x()),
                f64::from(mouse.client_y()),
                w,
                h,
            ));
        })?
    };

    let resize = {
        let window = page.window.clone();
        EventListener::new(&page.window, "resize", move |_event| {
            let (w, h) = viewport(&window);
            let (pw, ph) = surface_size(w, h, window.device_pixel_ratio());
            let _ = set_style(&canvas, "width", &css::px(w));
            let _ = set_style(&canvas, "height", &css::px(h));
            let mut scene = scene.borrow_mut();
            scene.animator.resize(w, h);
            scene.renderer.resize(pw, ph);
        })?
    };

    *slot.borrow_mut() = Some(Running {
        _frames: frames,
        _pointer: pointer,
        _resize: resize,
    });
    Ok(points)
}

