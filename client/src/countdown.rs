use std::any::Any;
use std::cell::RefCell;

use chrono::{DateTime, Local, Utc};
use gloo_timers::callback::Interval;
use leptos::mount::mount_to;
use leptos::prelude::*;
use wasm_bindgen::JsCast;

use itinerary_shared::PageConfig;
use itinerary_shared::countdown::{self, Countdown};

use crate::error::MountError;

const TICK_MS: u32 = 1_000;

thread_local! {
    static COUNTDOWN_MOUNT: RefCell<Option<Box<dyn Any>>> = RefCell::new(None);
    static COUNTDOWN_TICK: RefCell<Option<Interval>> = const { RefCell::new(None) };
}

#[component]
fn CountdownUnit(id: &'static str, value: String, label: &'static str) -> impl IntoView {
    view! {
        <div class="cd-unit">
            <span class="cd-num" id=id>{value}</span>
            <span class="cd-label">{label}</span>
        </div>
    }
}

#[component]
fn CountdownPanel(target: DateTime<Utc>, completion_message: String) -> impl IntoView {
    let now = RwSignal::new(Utc::now());
    let display = Memo::new(move |_| countdown::remaining(target, now.get()));

    Effect::new(move || {
        COUNTDOWN_TICK.with(|slot| {
            let interval = Interval::new(TICK_MS, move || now.set(Utc::now()));
            // Replacing the slot drops (and cancels) any previous interval.
            *slot.borrow_mut() = Some(interval);
        });
    });

    move || match display.get() {
        Countdown::Remaining(parts) => {
            let [days, hours, minutes, seconds] = parts.padded();
            view! {
                <div class="countdown-grid">
                    <CountdownUnit id="days" value=days label="Days" />
                    <CountdownUnit id="hours" value=hours label="Hours" />
                    <CountdownUnit id="minutes" value=minutes label="Minutes" />
                    <CountdownUnit id="seconds" value=seconds label="Seconds" />
                </div>
            }
            .into_any()
        }
        Countdown::Departed => view! {
            <p style="font-size:1.3rem;color:var(--accent);letter-spacing:0.05em">
                {completion_message.clone()}
            </p>
        }
        .into_any(),
    }
}

/// Replace the countdown container's static markup with the live countdown.
pub fn mount(document: &web_sys::Document, config: &PageConfig) -> Result<(), MountError> {
    let container_id = &config.selectors.countdown;
    let container = document
        .get_element_by_id(container_id)
        .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok())
        .ok_or_else(|| MountError::MissingElement(container_id.clone()))?;

    let Some(target) = countdown::departure_instant(config.departure, &Local) else {
        return Err(MountError::Js {
            context: "countdown",
            message: format!("departure {} does not exist in the local time zone", config.departure),
        });
    };
    let completion_message = config.completion_message.clone();

    container.set_inner_html("");
    COUNTDOWN_MOUNT.with(move |slot| {
        let _old = slot.borrow_mut().take();
        let handle = mount_to(container, move || {
            view! { <CountdownPanel target=target completion_message=completion_message.clone() /> }
        });
        *slot.borrow_mut() = Some(Box::new(handle));
    });
    tracing::debug!(%target, "countdown mounted");
    Ok(())
}
