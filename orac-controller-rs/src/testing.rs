//! Recording fakes for the collaborators, shared by the unit tests.

use alloc::collections::VecDeque;
use alloc::string::{String, ToString};
use alloc::vec;
use alloc::vec::Vec;
use core::convert::Infallible;
use core::future::pending;

use embassy_time::Instant;
use orac::rack::Rack;
use orac_oled_display_rs::{Alignment, Font, Rect, Surface};

use crate::config::ControllerConfig;
use crate::controller::Controller;
use crate::protocol::{Arg, InboundPacket, Outbound, ADDRESS_PREFIX};
use crate::session::{Platform, Session};
use crate::sync::Link;
use crate::transport::Transport;

pub const RACK: &str = "127.0.0.1:6001";

pub type TestSession = Session<RecordingTransport, FakePlatform>;
pub type TestController = Controller<RecordingTransport, RecordingSurface, FakePlatform>;

// ── Transport ────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct RecordingTransport {
    pub sent: Vec<Outbound>,
    pub inbound: VecDeque<InboundPacket>,
    /// Reject every send.
    pub fail: bool,
}

impl Transport for RecordingTransport {
    type Error = ();

    fn send(&mut self, message: &Outbound) -> Result<(), Self::Error> {
        if self.fail {
            return Err(());
        }
        self.sent.push(message.clone());
        Ok(())
    }

    async fn receive(&mut self) -> InboundPacket {
        match self.inbound.pop_front() {
            Some(packet) => packet,
            None => pending().await,
        }
    }
}

// ── Surface ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Rect(Rect, bool),
    Text(String, Rect, bool, Alignment, Font),
}

/// Keeps the draw calls since the last `clear()`.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub ops: Vec<Op>,
    pub frames: u32,
}

impl RecordingSurface {
    pub fn texts(&self) -> Vec<String> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Text(text, ..) if !text.is_empty() => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn rect_drawn(&self, rect: Rect, filled: bool) -> bool {
        self.ops.contains(&Op::Rect(rect, filled))
    }
}

impl Surface for RecordingSurface {
    type Error = Infallible;

    fn clear(&mut self) -> Result<(), Self::Error> {
        self.ops.clear();
        Ok(())
    }

    fn draw_rect(&mut self, rect: Rect, filled: bool) -> Result<(), Self::Error> {
        self.ops.push(Op::Rect(rect, filled));
        Ok(())
    }

    fn draw_text(
        &mut self,
        text: &str,
        rect: Rect,
        filled: bool,
        alignment: Alignment,
        font: Font,
    ) -> Result<(), Self::Error> {
        self.ops
            .push(Op::Text(text.to_string(), rect, filled, alignment, font));
        Ok(())
    }

    async fn present(&mut self) -> Result<(), Self::Error> {
        self.frames += 1;
        Ok(())
    }
}

// ── Platform ─────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct FakePlatform {
    pub addresses: Vec<(String, String)>,
    pub shutdowns: u32,
    pub saves: u32,
}

impl Platform for FakePlatform {
    fn interface_address(&self, interface: &str) -> Option<String> {
        self.addresses
            .iter()
            .find(|(name, _)| name == interface)
            .map(|(_, address)| address.clone())
    }

    fn shutdown(&mut self) {
        self.shutdowns += 1;
    }

    fn save_settings(&mut self, _rack: &Rack) {
        self.saves += 1;
    }
}

// ── Builders ─────────────────────────────────────────────────────────────

pub fn packet(name: &str, args: Vec<Arg>) -> InboundPacket {
    let mut address = String::from(ADDRESS_PREFIX);
    address.push_str(name);
    InboundPacket { address, args }
}

pub fn session() -> TestSession {
    Session::new(Link::new(RecordingTransport::default(), 9001), FakePlatform::default())
}

pub fn controller() -> TestController {
    Controller::new(
        RecordingTransport::default(),
        RecordingSurface::default(),
        FakePlatform::default(),
        ControllerConfig::default(),
    )
}

/// Rack identity message.
pub fn identify(c: &mut TestController, now: Instant) {
    c.handle_inbound(
        &packet("rack", vec![RACK.into(), "127.0.0.1".into(), Arg::Int(6001)]),
        now,
    );
}

/// Slot `a1` holds "Brds Mono" with two pages:
///
/// - Oscillator: `o_colour` (pct 0..100 = 50), `o_shape` (int 0..10 = 0),
///   and a dangling `o_gone`
/// - Envelope: `e_mute` (bool, on)
pub fn declare(c: &mut TestController, now: Instant) {
    let messages = [
        packet(
            "module",
            vec![RACK.into(), "a1".into(), "Brds Mono".into(), "synth/brdsmono".into()],
        ),
        packet(
            "page",
            vec![
                RACK.into(),
                "a1".into(),
                "pg_osc".into(),
                "Oscillator".into(),
                "o_colour".into(),
                "o_shape".into(),
                "o_gone".into(),
            ],
        ),
        packet(
            "page",
            vec![RACK.into(), "a1".into(), "pg_env".into(), "Envelope".into(), "e_mute".into()],
        ),
        packet(
            "param",
            vec![
                RACK.into(),
                "a1".into(),
                "pct".into(),
                "o_colour".into(),
                "Colour".into(),
                Arg::Float(0.0),
                Arg::Float(100.0),
                Arg::Float(50.0),
            ],
        ),
        packet(
            "param",
            vec![
                RACK.into(),
                "a1".into(),
                "int".into(),
                "o_shape".into(),
                "Shape".into(),
                Arg::Int(0),
                Arg::Int(10),
                Arg::Int(0),
            ],
        ),
        packet(
            "param",
            vec![
                RACK.into(),
                "a1".into(),
                "bool".into(),
                "e_mute".into(),
                "Mute".into(),
                Arg::Int(1),
            ],
        ),
    ];
    for message in &messages {
        c.handle_inbound(message, now);
    }
}

pub fn populate(c: &mut TestController, now: Instant) {
    identify(c, now);
    declare(c, now);
}

/// A session holding the same rack as [`populate`].
pub fn populated_session() -> TestSession {
    let mut c = controller();
    populate(&mut c, Instant::from_millis(0));
    let mut s = session();
    s.rack = c.session().rack.clone();
    s
}
