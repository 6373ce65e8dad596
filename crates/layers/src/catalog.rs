use foundation::handles::LayerHandle;
use tracing::warn;

use crate::capabilities::{CapabilityLayer, CapabilityRequest};
use crate::descriptor::{LayerCategory, LayerDescriptor, LayerOptions, SourceKind};
use crate::error::CatalogError;

/// Key of a resolved catalog entry.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct LayerKey(u32);

/// Sequencing token for a capability insertion.
///
/// Minted at call time so the descriptor's position is fixed before
/// the fetch resolves.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Ticket(u32);

#[derive(Debug)]
enum Slot {
    Resolved(LayerDescriptor),
    Pending {
        request: CapabilityRequest,
        options: LayerOptions,
    },
    Abandoned,
}

/// Ordered set of layer descriptors.
///
/// Ordering contract: insertion order equals the order `add_layer` /
/// `reserve_capability_layer` were called, never the order fetches
/// resolve. Each call claims the next slot index, which doubles as
/// the entry's `render_order`; a reservation that fails is abandoned
/// in place, leaving every other entry's order untouched.
#[derive(Debug, Default)]
pub struct LayerCatalog {
    slots: Vec<Slot>,
}

impl LayerCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a descriptor for an already-constructed layer.
    pub fn add_layer(&mut self, handle: LayerHandle, options: LayerOptions) -> LayerKey {
        let order = self.slots.len() as u32;
        let display_name = options
            .display_name
            .clone()
            .unwrap_or_else(|| format!("Layer {order}"));
        self.slots.push(Slot::Resolved(LayerDescriptor {
            handle,
            display_name,
            category: options.category,
            enabled: options.enabled,
            render_order: order,
            opacity: options.opacity,
            detail_control: options.detail_control,
            time_dependent: options.time_dependent,
            source_kind: SourceKind::Static,
        }));
        LayerKey(order)
    }

    /// Claims the next slot for a capability-derived layer.
    pub fn reserve_capability_layer(
        &mut self,
        request: CapabilityRequest,
        options: LayerOptions,
    ) -> Ticket {
        let order = self.slots.len() as u32;
        self.slots.push(Slot::Pending { request, options });
        Ticket(order)
    }

    pub fn request(&self, ticket: Ticket) -> Option<&CapabilityRequest> {
        match self.slots.get(ticket.0 as usize) {
            Some(Slot::Pending { request, .. }) => Some(request),
            _ => None,
        }
    }

    /// Fills a reserved slot with the resolved layer.
    ///
    /// Caller options win over manifest values where both speak.
    pub fn fulfill(
        &mut self,
        ticket: Ticket,
        handle: LayerHandle,
        resolved: &CapabilityLayer,
    ) -> Result<LayerKey, CatalogError> {
        let slot = self
            .slots
            .get_mut(ticket.0 as usize)
            .ok_or(CatalogError::StaleTicket)?;
        let Slot::Pending { options, .. } = slot else {
            return Err(CatalogError::StaleTicket);
        };
        let options = options.clone();

        let display_name = options
            .display_name
            .unwrap_or_else(|| resolved.display_name().to_string());
        *slot = Slot::Resolved(LayerDescriptor {
            handle,
            display_name,
            category: options.category,
            enabled: options.enabled,
            render_order: ticket.0,
            opacity: options.opacity.or(resolved.opacity),
            detail_control: options.detail_control,
            time_dependent: options.time_dependent || resolved.time_dependent,
            source_kind: SourceKind::CapabilityDerived,
        });
        Ok(LayerKey(ticket.0))
    }

    /// Releases a reserved slot after a failed fetch or resolve.
    ///
    /// The catalog is otherwise unaffected; no descriptor is added
    /// and no surviving entry moves.
    pub fn abandon(&mut self, ticket: Ticket, error: &CatalogError) -> bool {
        match self.slots.get_mut(ticket.0 as usize) {
            Some(slot) if matches!(slot, Slot::Pending { .. }) => {
                warn!(%error, slot = ticket.0, "capability layer omitted");
                *slot = Slot::Abandoned;
                true
            }
            _ => false,
        }
    }

    pub fn get(&self, key: LayerKey) -> Option<&LayerDescriptor> {
        match self.slots.get(key.0 as usize) {
            Some(Slot::Resolved(descriptor)) => Some(descriptor),
            _ => None,
        }
    }

    /// Flips `enabled`; returns the new value.
    pub fn set_enabled(&mut self, key: LayerKey, enabled: bool) -> Option<bool> {
        match self.slots.get_mut(key.0 as usize) {
            Some(Slot::Resolved(descriptor)) => {
                descriptor.enabled = enabled;
                Some(enabled)
            }
            _ => None,
        }
    }

    pub fn toggle_enabled(&mut self, key: LayerKey) -> Option<bool> {
        let enabled = !self.get(key)?.enabled;
        self.set_enabled(key, enabled)
    }

    /// Resolved descriptors in draw order (ascending `render_order`).
    pub fn draw_order(&self) -> Vec<&LayerDescriptor> {
        self.slots
            .iter()
            .filter_map(|slot| match slot {
                Slot::Resolved(descriptor) => Some(descriptor),
                _ => None,
            })
            .collect()
    }

    /// Resolved descriptors in the given UI category, in draw order.
    pub fn in_category(&self, category: LayerCategory) -> Vec<&LayerDescriptor> {
        self.draw_order()
            .into_iter()
            .filter(|d| d.category == category)
            .collect()
    }

    /// Count of resolved descriptors.
    pub fn len(&self) -> usize {
        self.draw_order().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn pending_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| matches!(slot, Slot::Pending { .. }))
            .count()
    }
}
