use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use leptos::prelude::*;
use web_sys::{Element, HtmlCanvasElement};
use starfield_core::scene;
use starfield_core::viewport::CanvasSize;
use starfield_core::StarfieldConfig;
use crate::canvas::frame_loop::FrameLoop;
use crate::canvas::image_loader::LoadingImage;
use crate::canvas::painter::{get_canvas_ctx, CanvasPainter};
use crate::resize::ResizeSubscription;

type Scene = scene::Starfield<LoadingImage>;

const CANVAS_STYLE: &str =
    "display: block; transform-origin: 50% 0; transform: rotateX(50deg); width: 100%; height: 150%;";

const FADE_STYLE: &str = "position: absolute; top: 0; left: 0; right: 0; bottom: 0; pointer-events: none; \
     background: linear-gradient(to bottom, rgba(0, 0, 0, 0.85) 0%, transparent 33%);";

/// Browser resources owned by one mounted scroller. Dropping this stops the
/// frame loop and unhooks the resize listener.
struct Running {
    _frames: Option<FrameLoop>,
    _resize: Option<ResizeSubscription>,
}

thread_local! {
    static INSTANCES: RefCell<HashMap<u64, Running>> = RefCell::new(HashMap::new());
    static NEXT_INSTANCE: Cell<u64> = const { Cell::new(0) };
}

fn next_instance_id() -> u64 {
    NEXT_INSTANCE.with(|n| {
        let id = n.get();
        n.set(id.wrapping_add(1));
        id
    })
}

/// Parallax image scroller. One prop per configuration option.
#[component]
pub fn Starfield(
    /// Image URLs. Must not be empty.
    #[prop(into)]
    images: Vec<String>,
    #[prop(into, default = "#000000".to_string())]
    background: String,
    /// Drawn under tiles that have not fully faded in.
    #[prop(optional, into)]
    placeholder: Option<String>,
    #[prop(into, default = "100%".to_string())]
    width: String,
    #[prop(into, default = "100%".to_string())]
    height: String,
    /// Tile height / width.
    #[prop(default = 1.4)]
    ratio: f64,
    /// Minimum column count.
    #[prop(default = 3)]
    row_min: usize,
    /// Maximum column count.
    #[prop(default = 9)]
    row_max: usize,
    /// Target tile width in pixels.
    #[prop(default = 250.0)]
    item_width: f64,
    #[prop(default = 1.0)]
    speed: f64,
    /// Gap between tiles as a fraction of tile width.
    #[prop(default = 0.05)]
    spacing: f64,
) -> impl IntoView {
    let config = StarfieldConfig {
        images,
        background,
        placeholder,
        width,
        height,
        ratio,
        row_min,
        row_max,
        item_width,
        speed,
        spacing,
    };
    view! { <StarfieldView config=config /> }
}

/// The scroller driven by an already assembled configuration.
#[component]
pub fn StarfieldView(config: StarfieldConfig) -> impl IntoView {
    if let Err(e) = config.validate() {
        log::error!("Starfield disabled: {e}");
        return view! { <div class="starfield starfield-invalid"></div> }.into_any();
    }

    let container_ref = NodeRef::<leptos::html::Div>::new();
    let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
    let perspective = RwSignal::new(0.0f64);
    let instance = next_instance_id();

    let background = config.background.clone();
    let box_width = config.width.clone();
    let box_height = config.height.clone();

    // Start once both elements are in the DOM.
    Effect::new(move || {
        let Some(container_el) = container_ref.get() else { return };
        let Some(canvas_el) = canvas_ref.get() else { return };
        if INSTANCES.with(|m| m.borrow().contains_key(&instance)) {
            return;
        }
        let container: &Element = container_el.as_ref();
        let canvas: &HtmlCanvasElement = canvas_el.as_ref();
        let running = start(config.clone(), container.clone(), canvas.clone(), perspective);
        INSTANCES.with(|m| m.borrow_mut().insert(instance, running));
    });

    on_cleanup(move || {
        INSTANCES.with(|m| m.borrow_mut().remove(&instance));
    });

    let container_style = move || {
        format!(
            "position: relative; overflow: hidden; perspective: {}px; background: {}; width: {}; height: {};",
            perspective.get(),
            background,
            box_width,
            box_height,
        )
    };

    view! {
        <div class="starfield" node_ref=container_ref style=container_style>
            <canvas node_ref=canvas_ref style=CANVAS_STYLE />
            <div class="starfield-fade" style=FADE_STYLE></div>
        </div>
    }
    .into_any()
}

fn start(
    config: StarfieldConfig,
    container: Element,
    canvas: HtmlCanvasElement,
    perspective: RwSignal<f64>,
) -> Running {
    let idle = Running { _frames: None, _resize: None };

    let Some(ctx) = get_canvas_ctx(&canvas) else {
        log::error!("Starfield: canvas has no 2d context");
        return idle;
    };
    let placeholder = config.placeholder.as_deref().map(LoadingImage::start);

    let seed = (js_sys::Math::random() * u64::MAX as f64) as u64;
    let scene = match Scene::new(config, seed) {
        Ok(s) => Rc::new(RefCell::new(s)),
        Err(e) => {
            log::error!("Starfield disabled: {e}");
            return idle;
        }
    };

    let sync = {
        let scene = scene.clone();
        let canvas = canvas.clone();
        move || sync_canvas_size(&container, &canvas, &scene, perspective)
    };
    sync();
    let resize = ResizeSubscription::subscribe(sync);

    let frames = FrameLoop::start(move |timestamp| {
        let mut painter = CanvasPainter::new(&ctx, &canvas, placeholder.as_ref());
        let width = canvas.width() as f64;
        scene.borrow_mut().render_frame(timestamp, width, &mut painter);
    });

    log::info!("Starfield mounted");
    Running { _frames: frames, _resize: resize }
}

/// Match the canvas backing store to its container (with vertical overscan)
/// and rebuild the layout if the size changed.
fn sync_canvas_size(
    container: &Element,
    canvas: &HtmlCanvasElement,
    scene: &RefCell<Scene>,
    perspective: RwSignal<f64>,
) {
    let rect = container.get_bounding_client_rect();
    let target = CanvasSize::overscanned(rect.width(), rect.height());
    let current = CanvasSize::new(canvas.width(), canvas.height());
    if !scene.borrow().needs_relayout(target, current) {
        return;
    }

    log::debug!("Starfield canvas {}x{} -> {}x{}", current.width, current.height, target.width, target.height);
    canvas.set_width(target.width);
    canvas.set_height(target.height);
    perspective.set(target.perspective_depth());

    scene
        .borrow_mut()
        .relayout(target.width as f64, target.height as f64, LoadingImage::start);
}
