//! Browser front-end of the picture-order quiz.
//!
//! Builds the question row, answer box and option pool in the DOM, turns
//! pointer events into [`DragSession`] calls on the [`QuizSession`], and runs
//! a `requestAnimationFrame` loop that advances the session clock and draws
//! confetti on a full-screen canvas overlay.
//!
//! Pointer events cover mouse and touch alike. The in-flight drag lives in
//! `QuizUi::drag` only between events: each handler takes it out, threads it
//! through the session and stores the returned value back.
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    CanvasRenderingContext2d, Document, Element, HtmlAudioElement, HtmlCanvasElement,
    HtmlElement, HtmlImageElement, PointerEvent, window,
};

mod answer_box;
mod dataset;
mod hover;
mod placement;
mod scheduler;
mod session;

// Built-in page data lives in one file per page:
mod quiz_page1;
mod quiz_page2;
mod quiz_page3;
mod quiz_page4;

pub use answer_box::{AnswerBox, DragPhase, DragSession, DragSource, DropOutcome, RejectReason};
pub use dataset::{Dataset, FIRST_PAGE, Page, StaticDataset, builtin};
pub use hover::{PointerSample, SlotLayout, resolve_for, resolve_insertion_index};
pub use placement::{ItemRef, Placement};
pub use scheduler::{Scheduler, TimerId};
pub use session::{
    AudioCue, FlashColor, QuizConfig, QuizSession, SessionPhase, Signal, Verdict, evaluate,
};

/// How-to-play line shown above the question.
pub const GAME_INSTRUCTIONS: &str = "Drag pictures from Options into the Answer Box in the same order as the Question, then press Submit. Drag a placed picture over another to swap them.";

const CONFETTI_COLORS: [&str; 6] = ["#f94144", "#f9c74f", "#90be6d", "#43aa8b", "#577590", "#f3722c"];
const CONFETTI_PIECES: usize = 160;

// --- Confetti ---------------------------------------------------------------

struct ConfettiPiece {
    x: f64,
    y: f64,
    vx: f64,
    vy: f64,
    spin: f64,
    angle: f64,
    color: &'static str,
}

/// Runtime UI state.
struct QuizUi {
    session: QuizSession<StaticDataset>,
    drag: Option<DragSession>,
    ghost: Option<HtmlElement>,
    doc: Document,
    question_row: Element,
    answer_box: HtmlElement,
    answer_row: Element,
    options_row: Element,
    status: Element,
    message: Element,
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    confetti: Vec<ConfettiPiece>,
    last_frame_ms: f64,
    rng: u64,
}

thread_local! {
    static QUIZ_STATE: std::cell::RefCell<Option<QuizUi>> = const { std::cell::RefCell::new(None) };
}

fn now_ms() -> f64 {
    window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

fn clock_ms(now: f64) -> u64 {
    now.max(0.0) as u64
}

// --- WASM Entry --------------------------------------------------------------

/// Mounts the quiz with the given dataset and config into `document.body`.
pub fn start_quiz_with_dataset(dataset: StaticDataset, config: QuizConfig) -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let body = doc.body().ok_or_else(|| JsValue::from_str("no body"))?;

    let now = now_ms();
    let page_count = dataset.len();
    let session = QuizSession::new(dataset, config, clock_ms(now))
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    // Reuse an existing root so a second start replaces the old quiz.
    let root = match doc.get_element_by_id("poq-root") {
        Some(el) => {
            el.set_inner_html("");
            el
        }
        None => {
            let el = doc.create_element("div")?;
            el.set_id("poq-root");
            el.set_attribute("style", "max-width:960px; margin:16px auto; font-family:sans-serif; text-align:center;")?;
            body.append_child(&el)?;
            el
        }
    };

    let instructions = append_div(&doc, &root, "poq-instructions", "font-size:14px; color:#555; margin-bottom:8px;")?;
    instructions.set_text_content(Some(GAME_INSTRUCTIONS));
    let status = append_div(&doc, &root, "poq-status", "font-size:15px; margin-bottom:8px;")?;
    let heading = doc.create_element("h3")?;
    heading.set_text_content(Some("Question:"));
    root.append_child(&heading)?;
    let question_row = append_div(&doc, &root, "poq-question", "display:flex; flex-wrap:wrap; justify-content:center; margin-bottom:12px;")?;

    let heading = doc.create_element("h3")?;
    heading.set_text_content(Some("Answer Box:"));
    root.append_child(&heading)?;
    let answer_line = append_div(&doc, &root, "poq-answer-line", "display:flex; justify-content:center; align-items:center; gap:8px;")?;
    let answer_box: HtmlElement = append_div(
        &doc,
        &answer_line,
        "poq-answer-box",
        "border:3px solid #ccc; border-radius:8px; padding:12px; min-height:180px; width:70%; display:flex; align-items:center; justify-content:center; transition:border-color 0.2s;",
    )?
    .dyn_into()?;
    // Inner row is the coordinate origin for hover-index resolution.
    let answer_row = append_div(&doc, &answer_box, "poq-answer-row", "display:flex; flex-wrap:wrap; align-items:center; justify-content:center;")?;

    let submit = doc.create_element("button")?;
    submit.set_id("poq-submit");
    submit.set_text_content(Some("Submit"));
    submit.set_attribute("style", "padding:8px 18px; border-radius:24px;")?;
    answer_line.append_child(&submit)?;
    let reset = doc.create_element("button")?;
    reset.set_id("poq-reset");
    reset.set_text_content(Some("Restart"));
    reset.set_attribute("style", "padding:8px 18px; border-radius:24px;")?;
    answer_line.append_child(&reset)?;

    let message = append_div(&doc, &root, "poq-message", "min-height:24px; margin:8px; font-weight:bold;")?;
    let heading = doc.create_element("h3")?;
    heading.set_text_content(Some("Options:"));
    root.append_child(&heading)?;
    let options_row = append_div(&doc, &root, "poq-options", "display:flex; flex-wrap:wrap; justify-content:center;")?;

    // Confetti overlay (never intercepts pointer input)
    let canvas: HtmlCanvasElement = match doc.get_element_by_id("poq-confetti") {
        Some(el) => el.dyn_into()?,
        None => {
            let c: HtmlCanvasElement = doc.create_element("canvas")?.dyn_into()?;
            c.set_id("poq-confetti");
            c.set_attribute("style", "position:fixed; left:0; top:0; width:100vw; height:100vh; pointer-events:none; z-index:50;")?;
            body.append_child(&c)?;
            c
        }
    };
    let width = win.inner_width()?.as_f64().unwrap_or(800.0);
    let height = win.inner_height()?.as_f64().unwrap_or(600.0);
    canvas.set_width(width as u32);
    canvas.set_height(height as u32);
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("no 2d context"))?
        .dyn_into()?;

    let ui = QuizUi {
        session,
        drag: None,
        ghost: None,
        doc: doc.clone(),
        question_row,
        answer_box,
        answer_row,
        options_row,
        status,
        message,
        canvas,
        ctx,
        confetti: Vec::new(),
        last_frame_ms: now,
        rng: now.to_bits() | 1,
    };
    render_page(&ui)?;
    gloo::console::log!(format!("quiz: started with {page_count} pages"));

    // Listeners and the frame loop are document-wide; install them once.
    let was_running = QUIZ_STATE.with(|cell| cell.replace(Some(ui)).is_some());
    if !was_running {
        install_listeners(&doc)?;
        start_quiz_loop();
    }
    Ok(())
}

fn append_div(doc: &Document, parent: &Element, id: &str, style: &str) -> Result<Element, JsValue> {
    let div = doc.create_element("div")?;
    div.set_id(id);
    div.set_attribute("style", style)?;
    parent.append_child(&div)?;
    Ok(div)
}

fn with_ui(f: impl FnOnce(&mut QuizUi)) {
    QUIZ_STATE.with(|cell| {
        if let Some(ui) = cell.borrow_mut().as_mut() {
            f(ui);
        }
    });
}

fn install_listeners(doc: &Document) -> Result<(), JsValue> {
    // Drag start (options pool and placed pictures share one listener)
    {
        let closure = Closure::wrap(Box::new(move |evt: PointerEvent| {
            with_ui(|ui| on_pointer_down(ui, &evt));
        }) as Box<dyn FnMut(_)>);
        doc.add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    {
        let closure = Closure::wrap(Box::new(move |evt: PointerEvent| {
            with_ui(|ui| on_pointer_move(ui, &evt));
        }) as Box<dyn FnMut(_)>);
        doc.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    {
        let closure = Closure::wrap(Box::new(move |evt: PointerEvent| {
            with_ui(|ui| on_pointer_up(ui, &evt));
        }) as Box<dyn FnMut(_)>);
        doc.add_event_listener_with_callback("pointerup", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    {
        let closure = Closure::wrap(Box::new(move |_evt: PointerEvent| {
            with_ui(cancel_drag);
        }) as Box<dyn FnMut(_)>);
        doc.add_event_listener_with_callback("pointercancel", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    // Submit / restart buttons are rebuilt on every start, so clicks are delegated.
    {
        let closure = Closure::wrap(Box::new(move |evt: web_sys::MouseEvent| {
            let id = evt
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .map(|el| el.id());
            match id.as_deref() {
                Some("poq-submit") => with_ui(on_submit),
                Some("poq-reset") => with_ui(on_reset),
                _ => {}
            }
        }) as Box<dyn FnMut(_)>);
        doc.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    Ok(())
}

type FrameCallback = std::rc::Rc<std::cell::RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn start_quiz_loop() {
    let f: FrameCallback = std::rc::Rc::new(std::cell::RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
        with_ui(|ui| quiz_tick(ui, ts));
        if let (Some(w), Some(cb)) = (window(), f.borrow().as_ref()) {
            let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut(f64)>));
    if let (Some(w), Some(cb)) = (window(), g.borrow().as_ref()) {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

// --- Tick & Rendering --------------------------------------------------------

fn quiz_tick(ui: &mut QuizUi, now: f64) {
    let signals = ui.session.advance(clock_ms(now));
    apply_signals(ui, signals);
    let dt = ((now - ui.last_frame_ms) / 1000.0).clamp(0.0, 0.1);
    ui.last_frame_ms = now;
    update_confetti(ui, dt);
    render_confetti(ui);
}

fn render_page(ui: &QuizUi) -> Result<(), JsValue> {
    let Some(page) = ui.session.current_page() else {
        return Ok(());
    };
    ui.question_row.set_inner_html("");
    for (i, item) in page.question.iter().enumerate() {
        let img = thumbnail(&ui.doc, item, &format!("question-{i}"))?;
        ui.question_row.append_child(&img)?;
    }
    ui.options_row.set_inner_html("");
    for (i, item) in page.images.iter().enumerate() {
        let img = thumbnail(&ui.doc, item, &format!("option-{i}"))?;
        img.set_attribute("data-option", &i.to_string())?;
        img.style().set_property("cursor", "grab")?;
        img.style().set_property("touch-action", "none")?;
        ui.options_row.append_child(&img)?;
    }
    render_answer(ui)?;
    render_status(ui);
    Ok(())
}

fn render_answer(ui: &QuizUi) -> Result<(), JsValue> {
    ui.answer_row.set_inner_html("");
    let dragged_slot = match ui.drag.as_ref().map(DragSession::source) {
        Some(DragSource::Placed { index }) => Some(index),
        _ => None,
    };
    for (i, item) in ui.session.placement().items().iter().enumerate() {
        let img = thumbnail(&ui.doc, item, &format!("answer-{i}"))?;
        img.set_attribute("data-slot", &i.to_string())?;
        img.style().set_property("touch-action", "none")?;
        if dragged_slot == Some(i) {
            img.style().set_property("opacity", "0.5")?;
        }
        ui.answer_row.append_child(&img)?;
    }
    Ok(())
}

fn render_status(ui: &QuizUi) {
    let text = format!(
        "Page {}  ·  Tries: {}  ·  Time: {}s",
        ui.session.page_number(),
        ui.session.attempts(),
        ui.session.elapsed_secs()
    );
    ui.status.set_text_content(Some(&text));
}

fn thumbnail(doc: &Document, item: &ItemRef, alt: &str) -> Result<HtmlImageElement, JsValue> {
    let img: HtmlImageElement = doc.create_element("img")?.dyn_into()?;
    img.set_src(item.as_str());
    img.set_alt(alt);
    img.set_width(100);
    img.set_height(100);
    img.set_draggable(false);
    img.style().set_property("margin", "5px")?;
    Ok(img)
}

fn set_message(ui: &QuizUi, text: &str) {
    ui.message.set_text_content(Some(text));
}

// --- Pointer handling --------------------------------------------------------

fn target_index(evt: &PointerEvent, attr: &str) -> Option<usize> {
    let el: Element = evt.target()?.dyn_into().ok()?;
    el.get_attribute(attr)?.parse().ok()
}

fn on_pointer_down(ui: &mut QuizUi, evt: &PointerEvent) {
    if ui.drag.is_some() {
        return;
    }
    let session = if let Some(i) = target_index(evt, "data-option") {
        ui.session.begin_option_drag(i)
    } else if let Some(i) = target_index(evt, "data-slot") {
        ui.session.begin_placed_drag(i)
    } else {
        return;
    };
    let Some(session) = session else {
        return;
    };
    evt.prevent_default();
    ui.ghost = make_ghost(&ui.doc, session.item(), evt).ok();
    ui.drag = Some(session);
    if render_answer(ui).is_err() {
        gloo::console::warn!("quiz: answer render failed");
    }
}

fn make_ghost(doc: &Document, item: &ItemRef, evt: &PointerEvent) -> Result<HtmlElement, JsValue> {
    let img = thumbnail(doc, item, "dragging")?;
    img.set_attribute("style", "position:fixed; pointer-events:none; opacity:0.8; z-index:60; margin:0;")?;
    move_ghost(&img, evt);
    doc.body()
        .ok_or_else(|| JsValue::from_str("no body"))?
        .append_child(&img)?;
    Ok(img.into())
}

fn move_ghost(ghost: &HtmlElement, evt: &PointerEvent) {
    let style = ghost.style();
    let _ = style.set_property("left", &format!("{}px", evt.client_x() - 50));
    let _ = style.set_property("top", &format!("{}px", evt.client_y() - 50));
}

fn inside(el: &Element, x: f64, y: f64) -> bool {
    let r = el.get_bounding_client_rect();
    x >= r.left() && x <= r.right() && y >= r.top() && y <= r.bottom()
}

/// Placed slot under the pointer, if any.
fn slot_under(ui: &QuizUi, x: f64, y: f64) -> Option<usize> {
    let children = ui.answer_row.children();
    (0..children.length()).find_map(|i| {
        let child = children.item(i)?;
        inside(&child, x, y).then_some(i as usize)
    })
}

fn on_pointer_move(ui: &mut QuizUi, evt: &PointerEvent) {
    let Some(session) = ui.drag.take() else {
        return;
    };
    if let Some(ghost) = &ui.ghost {
        move_ghost(ghost, evt);
    }
    let (x, y) = (evt.client_x() as f64, evt.client_y() as f64);
    if !inside(&ui.answer_box, x, y) {
        ui.drag = Some(session);
        return;
    }
    let session = match session.source() {
        DragSource::Option { .. } => {
            let origin = ui.answer_row.get_bounding_client_rect();
            let sample = PointerSample::new(x - origin.left(), y - origin.top());
            ui.session.hover(session, sample)
        }
        DragSource::Placed { index } => match slot_under(ui, x, y) {
            Some(slot) if slot != index => {
                let session = ui.session.hover_slot(session, slot);
                ui.drag = Some(session);
                if render_answer(ui).is_err() {
                    gloo::console::warn!("quiz: answer render failed");
                }
                return;
            }
            _ => session,
        },
    };
    ui.drag = Some(session);
}

fn on_pointer_up(ui: &mut QuizUi, evt: &PointerEvent) {
    let Some(session) = ui.drag.take() else {
        return;
    };
    remove_ghost(ui);
    let (x, y) = (evt.client_x() as f64, evt.client_y() as f64);
    if inside(&ui.answer_box, x, y) {
        match ui.session.drop_item(session) {
            DropOutcome::Rejected(reason) => {
                gloo::console::log!(format!("quiz: drop rejected ({reason:?})"));
            }
            DropOutcome::Inserted { .. } | DropOutcome::Reordered { .. } => {}
        }
    } else {
        ui.session.cancel_drag(session);
    }
    if render_answer(ui).is_err() {
        gloo::console::warn!("quiz: answer render failed");
    }
}

fn cancel_drag(ui: &mut QuizUi) {
    if let Some(session) = ui.drag.take() {
        ui.session.cancel_drag(session);
    }
    remove_ghost(ui);
    if render_answer(ui).is_err() {
        gloo::console::warn!("quiz: answer render failed");
    }
}

fn remove_ghost(ui: &mut QuizUi) {
    if let Some(ghost) = ui.ghost.take() {
        ghost.remove();
    }
}

fn on_submit(ui: &mut QuizUi) {
    if ui.drag.is_some() {
        return;
    }
    match ui.session.submit() {
        Ok((verdict, signals)) => {
            gloo::console::log!(format!("quiz: page {} judged {verdict:?}", ui.session.page_number()));
            render_status(ui);
            apply_signals(ui, signals);
        }
        Err(err) => gloo::console::log!(format!("quiz: {err}")),
    }
}

fn on_reset(ui: &mut QuizUi) {
    cancel_drag(ui);
    let signals = ui.session.reset();
    gloo::console::log!("quiz: session reset");
    apply_signals(ui, signals);
}

// --- Feedback ----------------------------------------------------------------

fn apply_signals(ui: &mut QuizUi, signals: Vec<Signal>) {
    for signal in signals {
        apply_signal(ui, signal);
    }
}

fn apply_signal(ui: &mut QuizUi, signal: Signal) {
    match signal {
        Signal::Cue(cue) => play_cue(cue),
        Signal::Flash(color) => {
            let css = match color {
                FlashColor::Success => "#2ecc71",
                FlashColor::Failure => "#e74c3c",
                FlashColor::Warning => "#f1c40f",
            };
            let _ = ui.answer_box.style().set_property("border-color", css);
        }
        Signal::FlashCleared => {
            let _ = ui.answer_box.style().set_property("border-color", "#ccc");
        }
        Signal::ConfettiStarted => spawn_confetti(ui),
        Signal::ConfettiStopped => ui.confetti.clear(),
        Signal::PleaseAddImages => set_message(ui, "Please add images to the answer box."),
        Signal::TryAgain => set_message(ui, "Wrong. Try again."),
        Signal::PlacementCleared => {
            set_message(ui, "");
            if render_answer(ui).is_err() {
                gloo::console::warn!("quiz: answer render failed");
            }
        }
        Signal::PageAdvanced { page } => {
            gloo::console::log!(format!("quiz: page {page}"));
            if render_page(ui).is_err() {
                gloo::console::warn!("quiz: page render failed");
            }
        }
        Signal::Completed { elapsed_secs, attempts } => {
            gloo::console::log!(format!("quiz: completed in {elapsed_secs}s after {attempts} tries"));
            set_message(
                ui,
                &format!("You have completed all questions! Time: {elapsed_secs}s, tries: {attempts}"),
            );
            render_status(ui);
        }
        Signal::Tick { .. } => render_status(ui),
        Signal::SessionReset => {
            ui.confetti.clear();
            set_message(ui, "");
            let _ = ui.answer_box.style().set_property("border-color", "#ccc");
        }
    }
}

fn play_cue(cue: AudioCue) {
    let src = match cue {
        AudioCue::Correct => "sounds/correct.mp3",
        AudioCue::Wrong => "sounds/wrong.mp3",
        AudioCue::Empty => "sounds/empty.mp3",
    };
    // Playback failures (autoplay policy, missing file) never reach the session.
    match HtmlAudioElement::new_with_src(src) {
        Ok(audio) => {
            if audio.play().is_err() {
                gloo::console::warn!("quiz: audio play failed", src);
            }
        }
        Err(_) => gloo::console::warn!("quiz: audio unavailable", src),
    }
}

fn next_rand(ui: &mut QuizUi) -> f64 {
    // Linear congruential step; visual randomness only.
    ui.rng = ui
        .rng
        .wrapping_mul(6364136223846793005)
        .wrapping_add(1442695040888963407);
    (ui.rng >> 11) as f64 / (1u64 << 53) as f64
}

fn spawn_confetti(ui: &mut QuizUi) {
    let w = ui.canvas.width() as f64;
    ui.confetti.clear();
    for i in 0..CONFETTI_PIECES {
        let piece = ConfettiPiece {
            x: next_rand(ui) * w,
            y: -20.0 - next_rand(ui) * 200.0,
            vx: (next_rand(ui) - 0.5) * 120.0,
            vy: 80.0 + next_rand(ui) * 160.0,
            spin: (next_rand(ui) - 0.5) * 8.0,
            angle: next_rand(ui) * std::f64::consts::TAU,
            color: CONFETTI_COLORS[i % CONFETTI_COLORS.len()],
        };
        ui.confetti.push(piece);
    }
}

fn update_confetti(ui: &mut QuizUi, dt: f64) {
    let h = ui.canvas.height() as f64;
    for p in &mut ui.confetti {
        p.vy += 60.0 * dt;
        p.x += p.vx * dt;
        p.y += p.vy * dt;
        p.angle += p.spin * dt;
        if p.y > h + 20.0 {
            p.y = -20.0; // recycle while the celebration lasts
        }
    }
}

fn render_confetti(ui: &QuizUi) {
    let (w, h) = (ui.canvas.width() as f64, ui.canvas.height() as f64);
    ui.ctx.clear_rect(0.0, 0.0, w, h);
    for p in &ui.confetti {
        ui.ctx.save();
        let _ = ui.ctx.translate(p.x, p.y);
        let _ = ui.ctx.rotate(p.angle);
        ui.ctx.set_fill_style_str(p.color);
        ui.ctx.fill_rect(-4.0, -7.0, 8.0, 14.0);
        ui.ctx.restore();
    }
}
