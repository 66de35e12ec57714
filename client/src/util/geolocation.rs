//! One-shot browser geolocation with a hard timeout.
//!
//! Wraps `navigator.geolocation.getCurrentPosition` in a future. Browsers
//! may sit on an unanswered permission prompt without honoring the request
//! timeout, so the call also races a local timer of the same length. The
//! browser may still answer after the timer wins; that late answer lands in
//! a closed channel and is ignored.

#[cfg(any(feature = "hydrate", test))]
use std::cell::RefCell;

use geomap::geo::Coordinate;
use geomap::location::{LocationError, LocationOptions};

#[cfg(test)]
#[path = "geolocation_test.rs"]
mod geolocation_test;

#[cfg(any(feature = "hydrate", test))]
type Reply = futures::channel::oneshot::Sender<Result<Coordinate, LocationError>>;

/// Hand the first browser answer to the waiting request. Returns `false`
/// when the answer came second or after the request gave up.
#[cfg(any(feature = "hydrate", test))]
fn deliver(reply: &RefCell<Option<Reply>>, outcome: Result<Coordinate, LocationError>) -> bool {
    reply.borrow_mut().take().is_some_and(|tx| tx.send(outcome).is_ok())
}

/// Resolve the device position, or the reason it is unknown.
///
/// # Errors
///
/// [`LocationError::Denied`] when permission is refused,
/// [`LocationError::Timeout`] when no fix arrives in time, and
/// [`LocationError::Unavailable`] otherwise (including off-browser).
pub async fn current_position(options: LocationOptions) -> Result<Coordinate, LocationError> {
    #[cfg(feature = "hydrate")]
    {
        use futures::FutureExt;

        let request = request_position(options).fuse();
        let timer = gloo_timers::future::sleep(std::time::Duration::from_millis(u64::from(options.timeout_ms))).fuse();
        futures::pin_mut!(request, timer);
        futures::select! {
            outcome = request => outcome,
            () = timer => Err(LocationError::Timeout),
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = options;
        Err(LocationError::Unavailable)
    }
}

#[cfg(feature = "hydrate")]
async fn request_position(options: LocationOptions) -> Result<Coordinate, LocationError> {
    use std::rc::Rc;

    use futures::channel::oneshot;
    use wasm_bindgen::prelude::*;

    let geolocation = web_sys::window()
        .ok_or(LocationError::Unavailable)?
        .navigator()
        .geolocation()
        .map_err(|_| LocationError::Unavailable)?;

    let (tx, rx) = oneshot::channel();
    let tx = Rc::new(RefCell::new(Some(tx)));

    // Callbacks may fire after the timeout race dropped this future, so they
    // are handed to JS as one-shot closures that own their sender.
    let on_success = {
        let tx = Rc::clone(&tx);
        Closure::once_into_js(move |position: web_sys::Position| {
            let coords = position.coords();
            if !deliver(&tx, Ok(Coordinate::new(coords.latitude(), coords.longitude()))) {
                log::debug!("position arrived after the request was dropped");
            }
        })
    };
    let on_error = {
        let tx = Rc::clone(&tx);
        Closure::once_into_js(move |error: web_sys::PositionError| {
            if !deliver(&tx, Err(LocationError::from_code(error.code()))) {
                log::debug!("position error arrived after the request was dropped");
            }
        })
    };

    let js_options = web_sys::PositionOptions::new();
    js_options.set_enable_high_accuracy(options.high_accuracy);
    js_options.set_timeout(options.timeout_ms);
    js_options.set_maximum_age(options.max_age_ms);

    geolocation
        .get_current_position_with_error_callback_and_options(
            on_success.unchecked_ref(),
            Some(on_error.unchecked_ref()),
            &js_options,
        )
        .map_err(|_| LocationError::Unavailable)?;

    rx.await.unwrap_or(Err(LocationError::Unavailable))
}
