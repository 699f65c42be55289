//! Manual ordering of the prompt library.
//!
//! Questions are ordered per mode by `(order_index, id)`. Moving a question
//! swaps its `order_index` with the neighbour above or below. The swap is two
//! separate writes; a third writer landing between them can leave duplicate
//! indexes behind, which the `id` tie-break keeps deterministic.

use crate::schemas::{Question, QuestionMode, QuestionPatch};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// One half of a swap: give `id` the `order_index`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderUpdate {
    pub id: i64,
    pub order_index: i64,
}

impl OrderUpdate {
    pub fn patch(self) -> QuestionPatch {
        QuestionPatch::new(self.id).with_order_index(self.order_index)
    }
}

/// The two writes of a move, in the order they must be issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapPlan {
    pub first: OrderUpdate,
    pub second: OrderUpdate,
}

/// Questions of one mode in display order.
pub fn sorted_for_mode(questions: &[Question], mode: QuestionMode) -> Vec<&Question> {
    let mut list: Vec<&Question> = questions.iter().filter(|q| q.mode == mode).collect();
    list.sort_by_key(|q| (q.order_index, q.id));
    list
}

/// Plan moving question `id` one slot in `direction` within its own mode.
///
/// Returns `None` for an unknown id, the first question moving up, or the
/// last one moving down. Both updates carry values captured before either
/// write, so applying them in sequence exchanges the two indexes exactly.
pub fn plan_move(questions: &[Question], id: i64, direction: Direction) -> Option<SwapPlan> {
    let mode = questions.iter().find(|q| q.id == id)?.mode;
    let list = sorted_for_mode(questions, mode);
    let index = list.iter().position(|q| q.id == id)?;

    let swap_index = match direction {
        Direction::Up => index.checked_sub(1)?,
        Direction::Down if index + 1 < list.len() => index + 1,
        Direction::Down => return None,
    };

    let current = list[index];
    let neighbour = list[swap_index];
    Some(SwapPlan {
        first: OrderUpdate {
            id: current.id,
            order_index: neighbour.order_index,
        },
        second: OrderUpdate {
            id: neighbour.id,
            order_index: current.order_index,
        },
    })
}
