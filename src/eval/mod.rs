//! Оценка силы покерных рук (Texas Hold'em).
//!
//! Основные функции:
//!   `evaluate_best_hand(cards) -> EvaluatedHand` — лучшая 5-карточная
//!   комбинация из 5–7 карт;
//!   `EvaluatedHand::cmp_strength` — полный порядок для дележа банка.

pub mod evaluator;
pub mod hand_rank;
pub mod lookup_tables;

pub use evaluator::{evaluate_best_hand, evaluate_hole_and_board, EvaluatedHand};
pub use hand_rank::{category_name, HandCategory};
