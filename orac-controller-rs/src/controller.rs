//! The controller context: one value owning every piece of UI state.

use embassy_time::Instant;
use orac_oled_display_rs::Surface;

use crate::config::ControllerConfig;
use crate::input::{ButtonEdge, Edge, InputArbiter, TimerRequest, UiAction};
use crate::navigation::Navigator;
use crate::scheduler::RenderScheduler;
use crate::session::{Platform, Session};
use crate::sync::Link;
use crate::transport::Transport;

/// Rack mirror, navigation, input arbitration and the redraw timer, plus
/// the collaborators they talk to.
///
/// Handlers are synchronous and return promptly; the event loop in
/// [`run()`](crate::run) feeds them and awaits only the surface.
///
/// ```text
///   ButtonEdge ─► handle_button ─► InputArbiter ─► Navigator ─► Link ─► Transport
///   Packet ────► handle_inbound ─► Rack ─► RenderScheduler
///   deadline ──► on_deadline ────► redraw / auto-repeat
/// ```
pub struct Controller<T, S, P> {
    pub(crate) config: ControllerConfig,
    pub(crate) session: Session<T, P>,
    pub(crate) navigator: Navigator,
    pub(crate) arbiter: InputArbiter,
    pub(crate) scheduler: RenderScheduler,
    pub(crate) surface: S,
}

impl<T: Transport, S: Surface, P: Platform> Controller<T, S, P> {
    /// Build the context and ask the rack for its full state.
    pub fn new(transport: T, surface: S, platform: P, config: ControllerConfig) -> Self {
        let mut link = Link::new(transport, config.listen_port);
        link.send_ping(0);
        Self {
            navigator: Navigator::new(&config),
            arbiter: InputArbiter::new(config),
            scheduler: RenderScheduler::new(config.redraw_delay()),
            session: Session::new(link, platform),
            surface,
            config,
        }
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn session(&self) -> &Session<T, P> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session<T, P> {
        &mut self.session
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn scheduler(&self) -> &RenderScheduler {
        &self.scheduler
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn transport(&self) -> &T {
        self.session.link.transport()
    }

    pub fn transport_mut(&mut self) -> &mut T {
        self.session.link.transport_mut()
    }

    /// When the shared timer next fires.
    pub fn deadline(&self) -> Option<Instant> {
        self.scheduler.deadline()
    }

    /// Feed one button edge. Returns `true` when the screen must be
    /// redrawn right away.
    pub fn handle_button(&mut self, edge: ButtonEdge, now: Instant) -> bool {
        #[cfg(feature = "defmt")]
        defmt::debug!("button {}", edge);

        let (action, timer) = match edge.edge {
            Edge::Press => self.arbiter.press(edge.button),
            Edge::Release => self.arbiter.release(edge.button),
        };
        match timer {
            TimerRequest::Keep => {}
            TimerRequest::Arm(delay) => self.scheduler.arm(now, delay),
            TimerRequest::Cancel => self.scheduler.cancel(now),
        }
        match action {
            Some(action) => {
                self.dispatch(action);
                true
            }
            None => false,
        }
    }

    fn dispatch(&mut self, action: UiAction) {
        self.navigator.settle();
        self.navigator.apply(action, &mut self.session);
    }

    /// The shared timer fired: release an owed redraw and re-deliver the
    /// held button. Returns `true` when a redraw is due.
    pub fn on_deadline(&mut self, now: Instant) -> bool {
        if !self.scheduler.expire(now) {
            return false;
        }
        let mut redraw = self.scheduler.take_redraw();
        if let Some((button, _)) = self.arbiter.held() {
            redraw |= self.handle_button(ButtonEdge::new(button, Edge::Press), now);
        }
        redraw
    }

    /// Repaint the active view.
    pub async fn render(&mut self) {
        let display = self.config.display;
        match self
            .navigator
            .render(&mut self.surface, &self.session, &display)
            .await
        {
            Ok(()) => self.scheduler.mark_rendered(),
            Err(_) => {
                #[cfg(feature = "defmt")]
                defmt::error!("render failed");
            }
        }
    }

    /// Clear the screen, e.g. before exiting.
    pub async fn blank(&mut self) {
        let cleared = match self.surface.clear() {
            Ok(()) => self.surface.present().await,
            Err(e) => Err(e),
        };
        if cleared.is_err() {
            #[cfg(feature = "defmt")]
            defmt::error!("blanking failed");
        }
    }
}
