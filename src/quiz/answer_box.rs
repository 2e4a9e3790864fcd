//! Answer box: owns the placement and reacts to hover / drop of an in-flight drag.
//!
//! A drag is an explicit [`DragSession`] value. The caller holds it between
//! pointer events and threads it through [`AnswerBox::hover`],
//! [`AnswerBox::hover_slot`] and finally [`AnswerBox::drop_item`] or
//! [`AnswerBox::cancel`]. No drag state lives inside the box itself.

use super::hover::{PointerSample, SlotLayout, resolve_for};
use super::placement::{ItemRef, Placement};

/// Where the dragged picture came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragSource {
    /// Fresh copy from the options pool.
    Option { index: usize },
    /// Already placed picture being reordered; `index` follows it as it moves.
    Placed { index: usize },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragPhase {
    Dragging,
    Hovering { insertion_index: usize },
}

/// Short-lived state of one drag gesture.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DragSession {
    item: ItemRef,
    source: DragSource,
    phase: DragPhase,
}

impl DragSession {
    pub fn from_option(item: ItemRef, option_index: usize) -> Self {
        Self { item, source: DragSource::Option { index: option_index }, phase: DragPhase::Dragging }
    }

    /// Starts reordering the placed picture at `index`; `None` if there is none.
    pub fn from_placed(placement: &Placement, index: usize) -> Option<Self> {
        placement.get(index).map(|item| Self {
            item: item.clone(),
            source: DragSource::Placed { index },
            phase: DragPhase::Dragging,
        })
    }

    pub fn item(&self) -> &ItemRef {
        &self.item
    }

    pub fn source(&self) -> DragSource {
        self.source
    }

    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    /// Insertion index computed by the most recent hover, if any.
    pub fn cached_index(&self) -> Option<usize> {
        match self.phase {
            DragPhase::Hovering { insertion_index } => Some(insertion_index),
            DragPhase::Dragging => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RejectReason {
    CapacityExceeded,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropOutcome {
    Inserted { index: usize },
    Reordered { index: usize },
    Rejected(RejectReason),
}

/// The drop target holding the user's answer.
#[derive(Clone, Debug)]
pub struct AnswerBox {
    placement: Placement,
    max_items: usize,
    layout: SlotLayout,
}

impl AnswerBox {
    pub fn new(max_items: usize, layout: SlotLayout) -> Self {
        Self { placement: Placement::empty(), max_items, layout }
    }

    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    pub fn max_items(&self) -> usize {
        self.max_items
    }

    pub fn layout(&self) -> &SlotLayout {
        &self.layout
    }

    pub fn is_full(&self) -> bool {
        self.placement.len() >= self.max_items
    }

    /// Pointer moved over the box. Fresh options cache their prospective
    /// insertion index; placed pictures reorder through [`Self::hover_slot`].
    pub fn hover(&self, session: DragSession, sample: PointerSample) -> DragSession {
        match session.source {
            DragSource::Option { .. } => {
                let insertion_index = resolve_for(&self.layout, sample, self.placement.len());
                DragSession { phase: DragPhase::Hovering { insertion_index }, ..session }
            }
            DragSource::Placed { .. } => session,
        }
    }

    /// Pointer passed over the placed slot `slot` while reordering: the
    /// dragged picture swaps into that slot immediately.
    pub fn hover_slot(&mut self, session: DragSession, slot: usize) -> DragSession {
        let DragSource::Placed { index } = session.source else {
            return session;
        };
        if index == slot || slot >= self.placement.len() {
            return session;
        }
        self.placement = self.placement.moved_within(index, slot);
        DragSession {
            source: DragSource::Placed { index: slot },
            phase: DragPhase::Hovering { insertion_index: slot },
            ..session
        }
    }

    /// Ends the drag over the box. A full box silently rejects fresh options;
    /// without a prior hover the picture goes to the end.
    pub fn drop_item(&mut self, session: DragSession) -> DropOutcome {
        match session.source {
            DragSource::Placed { index } => DropOutcome::Reordered { index },
            DragSource::Option { .. } => {
                if self.is_full() {
                    return DropOutcome::Rejected(RejectReason::CapacityExceeded);
                }
                let len = self.placement.len();
                let index = session.cached_index().unwrap_or(len).min(len);
                self.placement = self.placement.inserted_at(index, session.item, self.max_items);
                DropOutcome::Inserted { index }
            }
        }
    }

    /// Drag released outside the box; nothing changes.
    pub fn cancel(&self, session: DragSession) {
        drop(session);
    }

    pub fn clear(&mut self) {
        self.placement = Placement::empty();
    }

    /// Empties the box and adopts a new capacity (next page).
    pub fn reset_for(&mut self, max_items: usize) {
        self.placement = Placement::empty();
        self.max_items = max_items;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boxed(items: &[&str], max: usize) -> AnswerBox {
        let mut b = AnswerBox::new(max, SlotLayout::default());
        for (i, s) in items.iter().enumerate() {
            let session = DragSession::from_option((*s).into(), i);
            b.drop_item(session);
        }
        b
    }

    fn names(b: &AnswerBox) -> Vec<&str> {
        b.placement().items().iter().map(ItemRef::as_str).collect()
    }

    #[test]
    fn drop_without_hover_appends() {
        let b = boxed(&["a", "b"], 3);
        assert_eq!(names(&b), ["a", "b"]);
    }

    #[test]
    fn hover_caches_index_and_drop_uses_it() {
        let mut b = boxed(&["a", "c"], 3);
        let session = DragSession::from_option("b".into(), 0);
        assert_eq!(session.cached_index(), None);
        let session = b.hover(session, PointerSample::new(10.0, 5.0));
        let session = b.hover(session, PointerSample::new(120.0, 5.0));
        assert_eq!(session.cached_index(), Some(1));
        assert_eq!(b.drop_item(session), DropOutcome::Inserted { index: 1 });
        assert_eq!(names(&b), ["a", "b", "c"]);
    }

    #[test]
    fn full_box_rejects_silently() {
        let mut b = boxed(&["a", "b"], 2);
        let session = b.hover(DragSession::from_option("c".into(), 2), PointerSample::new(0.0, 0.0));
        assert_eq!(b.drop_item(session), DropOutcome::Rejected(RejectReason::CapacityExceeded));
        assert_eq!(names(&b), ["a", "b"]);
    }

    #[test]
    fn cancel_leaves_placement_untouched() {
        let b = boxed(&["a"], 3);
        let session = b.hover(DragSession::from_option("z".into(), 0), PointerSample::new(0.0, 0.0));
        b.cancel(session);
        assert_eq!(names(&b), ["a"]);
    }

    #[test]
    fn hover_slot_swaps_placed_items_continuously() {
        let mut b = boxed(&["a", "b", "c"], 3);
        let session = DragSession::from_placed(b.placement(), 0).expect("slot 0 exists");
        let session = b.hover_slot(session, 1);
        assert_eq!(names(&b), ["b", "a", "c"]);
        let session = b.hover_slot(session, 2);
        assert_eq!(names(&b), ["b", "c", "a"]);
        assert_eq!(session.source(), DragSource::Placed { index: 2 });
        assert_eq!(b.drop_item(session), DropOutcome::Reordered { index: 2 });
        assert_eq!(names(&b), ["b", "c", "a"]);
    }

    #[test]
    fn placed_drag_ignores_box_hover_and_option_ignores_slots() {
        let mut b = boxed(&["a", "b"], 3);
        let placed = DragSession::from_placed(b.placement(), 1).expect("slot 1 exists");
        let placed = b.hover(placed, PointerSample::new(0.0, 0.0));
        assert_eq!(placed.phase(), DragPhase::Dragging);
        let option = DragSession::from_option("c".into(), 0);
        let option = b.hover_slot(option, 0);
        assert_eq!(option.phase(), DragPhase::Dragging);
        assert_eq!(names(&b), ["a", "b"]);
        assert!(DragSession::from_placed(b.placement(), 7).is_none());
    }

    #[test]
    fn reset_for_clears_and_resizes() {
        let mut b = boxed(&["a", "b"], 2);
        assert!(b.is_full());
        b.reset_for(4);
        assert!(b.placement().is_empty());
        assert_eq!(b.max_items(), 4);
    }
}
