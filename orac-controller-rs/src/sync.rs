//! Protocol synchronizer.
//!
//! Inbound: [`Controller::handle_inbound()`] applies each decoded message
//! to the rack mirror and schedules a coalesced redraw.
//!
//! Outbound: [`Link`] wraps the transport. Commands that change rack state
//! update the local mirror first and then send, without waiting for a
//! confirmation. If the datagram is lost the mirror stays ahead of the
//! rack until the next authoritative `changed` event or rack reset.

use alloc::string::String;

use embassy_time::Instant;
use orac::rack::{Page, Param, Rack, ResourceKind};

use crate::controller::Controller;
use crate::protocol::{Inbound, InboundPacket, Outbound};
use crate::transport::Transport;

// ── Outbound ─────────────────────────────────────────────────────────────

/// Outbound half of the protocol.
pub struct Link<T> {
    transport: T,
    listen_port: i32,
}

impl<T> Link<T> {
    pub fn new(transport: T, listen_port: i32) -> Self {
        Self {
            transport,
            listen_port,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }
}

impl<T: Transport> Link<T> {
    fn send(&mut self, message: Outbound) {
        #[cfg(feature = "defmt")]
        defmt::debug!("send {}", message.address());
        if let Err(_e) = self.transport.send(&message) {
            #[cfg(feature = "defmt")]
            defmt::warn!("send failed: {}", message.address());
        }
    }

    /// Commands addressed to the rack need its identity.
    fn rack_id(rack: &Rack, _address: &str) -> Option<String> {
        let id = rack.id().map(String::from);
        if id.is_none() {
            #[cfg(feature = "defmt")]
            defmt::warn!("no rack identity yet, dropping {}", _address);
        }
        id
    }

    /// `keepalive_secs == 0` requests a full state publish.
    pub fn send_ping(&mut self, keepalive_secs: i32) {
        self.send(Outbound::Ping {
            listen_port: self.listen_port,
            keepalive_secs,
        });
    }

    /// The caller has already applied `value` locally.
    pub fn send_changed(&mut self, rack: &Rack, slot: &str, param: &str, value: f32) {
        if let Some(id) = Self::rack_id(rack, "/Kontrol/changed") {
            self.send(Outbound::Changed {
                rack: id,
                slot: slot.into(),
                param: param.into(),
                value,
            });
        }
    }

    /// Not applied locally; the rack answers with a fresh module declaration.
    pub fn send_load_module(&mut self, rack: &Rack, slot: &str, module: &str) {
        if let Some(id) = Self::rack_id(rack, "/Kontrol/loadModule") {
            self.send(Outbound::LoadModule {
                rack: id,
                slot: slot.into(),
                module: module.into(),
            });
        }
    }

    pub fn send_load_preset(&mut self, rack: &mut Rack, name: &str) {
        rack.set_current_preset(name);
        if let Some(id) = Self::rack_id(rack, "/Kontrol/loadPreset") {
            self.send(Outbound::LoadPreset {
                rack: id,
                name: name.into(),
            });
        }
    }

    pub fn send_save_preset(&mut self, rack: &mut Rack, name: &str) {
        rack.set_current_preset(name);
        if let Some(id) = Self::rack_id(rack, "/Kontrol/savePreset") {
            self.send(Outbound::SavePreset {
                rack: id,
                name: name.into(),
            });
        }
    }

    pub fn send_midi_learn(&mut self, rack: &mut Rack, enabled: bool) {
        rack.set_midi_learn(enabled);
        self.send(Outbound::MidiLearn(enabled));
    }

    pub fn send_mod_learn(&mut self, rack: &mut Rack, enabled: bool) {
        rack.set_mod_learn(enabled);
        self.send(Outbound::ModulationLearn(enabled));
    }
}

// ── Inbound ──────────────────────────────────────────────────────────────

impl<T: Transport, S, P> Controller<T, S, P> {
    /// Apply one inbound packet. Malformed or unknown packets are logged
    /// and dropped.
    pub fn handle_inbound(&mut self, packet: &InboundPacket, now: Instant) {
        let message = match Inbound::parse(packet) {
            Ok(message) => message,
            Err(_e) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("dropping {}: {}", packet.address.as_str(), _e);
                return;
            }
        };

        #[cfg(feature = "defmt")]
        defmt::debug!("inbound {}", packet.address.as_str());

        let session = &mut self.session;
        let rack = &mut session.rack;
        match message {
            Inbound::Rack { rack: id, .. } => {
                rack.set_id(&id);
                rack.reset();
                session.cursor.reset();
                self.navigator.reset();
                self.scheduler.reset_suppression(now);
                return;
            }
            Inbound::Module {
                slot, label, module, ..
            } => rack.set_module(&slot, &label, &module),
            Inbound::Page {
                slot,
                page,
                label,
                params,
                ..
            } => {
                if !rack.add_page(&slot, Page::new(&page, &label, params)) {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("page {} for empty slot {}", page.as_str(), slot.as_str());
                    return;
                }
            }
            Inbound::Param {
                slot,
                kind,
                param,
                label,
                range,
                default,
                ..
            } => {
                let (min, max) = range.unwrap_or((0.0, 1.0));
                let added = match Param::new(kind, &param, &label, min, max, default) {
                    Ok(p) => rack.add_param(&slot, p),
                    Err(_e) => {
                        #[cfg(feature = "defmt")]
                        defmt::warn!("param {} rejected: {}", param.as_str(), _e);
                        return;
                    }
                };
                if !added {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("param {} for empty slot {}", param.as_str(), slot.as_str());
                    return;
                }
            }
            Inbound::Changed {
                slot, param, value, ..
            } => {
                rack.set_param_current(&slot, &param, value);
            }
            Inbound::LoadPreset { name, .. } => rack.set_current_preset(&name),
            // The new module's declarations follow on their own.
            Inbound::LoadModule { .. } => {}
            Inbound::Resource { kind, value, .. } => match ResourceKind::from_tag(&kind) {
                Some(kind) => {
                    rack.add_resource(kind, &value);
                    if kind == ResourceKind::ModuleOrder {
                        session.cursor.clamp_slot(rack.slot_len());
                    }
                }
                None => {
                    #[cfg(feature = "defmt")]
                    defmt::debug!("ignoring resource kind {}", kind.as_str());
                    return;
                }
            },
            Inbound::MidiLearn(enabled) => {
                rack.set_midi_learn(enabled);
                return;
            }
            Inbound::ModLearn(enabled) => {
                rack.set_mod_learn(enabled);
                return;
            }
            Inbound::Ping { .. } => {
                session.link.send_ping(self.config.keepalive_secs);
                return;
            }
            Inbound::PublishStart => {
                self.scheduler.disable_updates();
                return;
            }
            Inbound::PublishRackFinished { .. } => {
                self.scheduler.enable_updates(now);
                return;
            }
            Inbound::Publish(_) => return,
        }
        self.scheduler.schedule_redraw(now);
    }
}
