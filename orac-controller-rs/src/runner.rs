//! The event loop.

use embassy_futures::select::{select4, Either4};
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Instant, Timer};
use orac_oled_display_rs::Surface;

use crate::controller::Controller;
use crate::session::Platform;
use crate::transport::{ButtonSource, Transport};

/// Drive the controller until `terminate` is signalled.
///
/// This is a regular `async fn`, not an Embassy `#[task]`; wrap it in a
/// concrete task on the target. Each iteration waits for whichever comes
/// first: a button edge, an inbound packet, the shared deadline, or the
/// terminate signal. Handlers run to completion before the next event is
/// considered, so no state is shared across awaits.
///
/// On termination the screen is blanked before returning.
pub async fn run<T, S, P, B, M>(
    controller: &mut Controller<T, S, P>,
    buttons: &mut B,
    terminate: &Signal<M, ()>,
) where
    T: Transport,
    S: Surface,
    P: Platform,
    B: ButtonSource,
    M: RawMutex,
{
    #[cfg(feature = "defmt")]
    defmt::info!("controller running");

    controller.render().await;

    loop {
        let deadline = controller.deadline().unwrap_or(Instant::MAX);
        let event = select4(
            buttons.next_edge(),
            controller.transport_mut().receive(),
            Timer::at(deadline),
            terminate.wait(),
        )
        .await;

        let redraw = match event {
            Either4::First(edge) => controller.handle_button(edge, Instant::now()),
            Either4::Second(packet) => {
                controller.handle_inbound(&packet, Instant::now());
                false
            }
            Either4::Third(()) => controller.on_deadline(Instant::now()),
            Either4::Fourth(()) => {
                #[cfg(feature = "defmt")]
                defmt::info!("terminating");
                controller.blank().await;
                return;
            }
        };

        if redraw {
            controller.render().await;
        }
    }
}
