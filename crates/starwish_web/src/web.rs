use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use starwish::clock::HostClock;
use starwish::particles::ParticleField;
use starwish::prng::Prng;
use starwish::star::StarPose;
use starwish::wish::SubmissionResult;
use starwish::{GreetingWidget, WidgetEvent};

use crate::ui_model::{
    star_style, CountdownField, SubmitIcon, FOOTER, PLACEHOLDER, STAR_COLOR, STAR_POINTS,
    SUBTITLE, SUCCESS_MESSAGE, TITLE,
};

mod canvas;
mod storage;

pub(crate) const LOCALSTORAGE_CONFIG_KEY: &str = "starwish.config.v1";

/// One frame drives the scheduler, the confetti physics and the star.
const FRAME_MS: i32 = 16;

pub fn start() {
    mount_to_body(|| view! { <App /> });
}

pub(crate) fn log_info(msg: &str) {
    web_sys::console::log_1(&JsValue::from_str(msg));
}

pub(crate) fn log_warn(msg: &str) {
    web_sys::console::warn_1(&JsValue::from_str(msg));
}

struct AppRuntime {
    widget: GreetingWidget<Prng>,
    field: ParticleField,
    clock: HostClock,
    canvas_failed: bool,
}

impl AppRuntime {
    fn new() -> Self {
        let clock = HostClock::new();
        let config = storage::load_config();
        let seed = (js_seed() as u64) | 1;
        Self {
            widget: GreetingWidget::mount(
                config,
                Prng::new(seed),
                clock.now_ms(),
                &clock.local_now(),
            ),
            field: ParticleField::new(0.0, 0.0),
            clock,
            canvas_failed: false,
        }
    }

    /// Advance the widget, feed bursts into the particle field, step the physics.
    fn frame(&mut self) -> (Vec<WidgetEvent>, StarPose) {
        let now = self.clock.now_ms();
        let events = self.widget.advance(now, &self.clock.local_now());
        for ev in &events {
            if let WidgetEvent::Burst(b) = ev {
                self.field.spawn(b, self.widget.rng_mut());
            }
        }
        self.field.step(self.widget.rng_mut());
        (events, self.widget.star_pose(now))
    }
}

fn js_seed() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.time_origin() * 1000.0 + p.now())
        .unwrap_or(2026.0)
}

#[component]
fn App() -> impl IntoView {
    let runtime = StoredValue::new(AppRuntime::new());
    let canvas_ref = NodeRef::<leptos::html::Canvas>::new();

    let (remaining, set_remaining) = signal(runtime.with_value(|r| r.widget.remaining()));
    let (wish, set_wish) = signal(String::new());
    let (sent, set_sent) = signal(false);
    let (pose, set_pose) = signal(runtime.with_value(|r| r.widget.star_pose(r.clock.now_ms())));

    let (interval_id, set_interval_id) = signal::<Option<i32>>(None);

    let do_frame = move || {
        let frame = runtime.try_update_value(|r| {
            let out = r.frame();
            if let Some(canvas) = canvas_ref.get_untracked() {
                let (w, h) = canvas::fit_to_window(&canvas);
                r.field.resize(w, h);
                if let Err(e) = canvas::draw_particles(&canvas, r.field.particles()) {
                    if !r.canvas_failed {
                        log_warn(&e);
                        r.canvas_failed = true;
                    }
                }
            }
            out
        });
        let Some((events, star)) = frame else {
            return;
        };

        set_pose.set(star);
        for ev in events {
            match ev {
                WidgetEvent::Countdown(r) => set_remaining.set(r),
                WidgetEvent::Reset => {
                    set_sent.set(false);
                    set_wish.set(String::new());
                }
                WidgetEvent::Burst(_) | WidgetEvent::CelebrationFinished => {}
            }
        }
    };

    let do_start = move || {
        if interval_id.get_untracked().is_some() {
            return;
        }
        let Some(window) = web_sys::window() else {
            log_warn("no window");
            return;
        };

        let cb = Closure::wrap(Box::new(move || {
            do_frame();
        }) as Box<dyn FnMut()>);

        match window.set_interval_with_callback_and_timeout_and_arguments_0(
            cb.as_ref().unchecked_ref(),
            FRAME_MS,
        ) {
            Ok(id) => {
                cb.forget();
                set_interval_id.set(Some(id));
            }
            Err(_) => log_warn("failed to start frame interval"),
        }
    };

    let do_stop = move || {
        if let Some(id) = interval_id.get_untracked() {
            if let Some(w) = web_sys::window() {
                w.clear_interval_with_handle(id);
            }
            set_interval_id.set(None);
        }
        runtime.update_value(|r| {
            r.widget.teardown();
            r.field.clear();
        });
    };

    on_cleanup(move || do_stop());
    do_start();

    let on_input = move |ev: leptos::ev::Event| {
        let text = event_target_value(&ev);
        let accepted = runtime
            .try_update_value(|r| r.widget.set_wish_text(text.clone()))
            .unwrap_or(false);
        if accepted {
            set_wish.set(text);
        }
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let result = runtime
            .try_update_value(|r| r.widget.submit(r.clock.now_ms(), &r.clock.local_now()))
            .unwrap_or(SubmissionResult::Ignored);
        if result == SubmissionResult::Sent {
            set_sent.set(true);
            log_info("wish sent to the stars");
        }
    };

    let countdown = CountdownField::all()
        .iter()
        .map(|&field| {
            view! {
                <div class="time-box">
                    <span>{move || field.value(&remaining.get()).to_string()}</span>
                    <label>{field.label()}</label>
                </div>
            }
        })
        .collect_view();

    view! {
        <div class="app-container">
            <div class="snow"></div>
            <div class="snow mid"></div>
            <div class="snow close"></div>

            <canvas
                node_ref=canvas_ref
                class="confetti"
                style="position: fixed; inset: 0; pointer-events: none; z-index: 0;"
            ></canvas>

            <main class="content">
                <div class="star-container" style=move || star_style(&pose.get())>
                    <svg width="120" height="120" viewBox="0 0 24 24">
                        <polygon
                            points=STAR_POINTS
                            fill=STAR_COLOR
                            stroke=STAR_COLOR
                            stroke-width="1"
                        />
                    </svg>
                </div>

                <h1 class="title">{TITLE}</h1>
                <p class="subtitle">{SUBTITLE}</p>

                <div class="countdown">{countdown}</div>

                <form class="wish-form" on:submit=on_submit>
                    <input
                        type="text"
                        placeholder=PLACEHOLDER
                        prop:value=move || wish.get()
                        prop:disabled=move || sent.get()
                        on:input=on_input
                    />
                    <button
                        type="submit"
                        prop:disabled=move || sent.get() || wish.get().is_empty()
                    >
                        {move || {
                            let icon = SubmitIcon::for_sent(sent.get());
                            view! { <span class=icon.class()>{icon.glyph()}</span> }
                        }}
                    </button>
                </form>

                <Show when=move || sent.get()>
                    <p class="success-message">{SUCCESS_MESSAGE}</p>
                </Show>
            </main>

            <footer class="footer">{FOOTER}</footer>
        </div>
    }
}
