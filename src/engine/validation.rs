use crate::domain::chips::Chips;
use crate::domain::seat::{Seat, SeatStatus};
use crate::domain::table::TableConfig;
use crate::engine::actions::ActionKind;
use crate::engine::betting::BettingState;
use crate::engine::errors::EngineError;

/// Проверка, может ли место выполнить действие при текущем состоянии ставок.
/// Сами фишки двигает game_loop; здесь только легальность.
pub fn validate_action(
    seat: &Seat,
    action: &ActionKind,
    betting: &BettingState,
    config: &TableConfig,
) -> Result<(), EngineError> {
    if !matches!(seat.status, SeatStatus::Active) {
        return Err(EngineError::IllegalAction);
    }

    let stack = seat.stack;
    let to_call = diff_to_call(seat, betting);

    match action {
        ActionKind::Fold => Ok(()),

        ActionKind::Check => {
            if betting.current_bet == seat.current_bet {
                Ok(())
            } else {
                Err(EngineError::CannotCheck)
            }
        }

        ActionKind::Call => {
            if to_call.is_zero() {
                Err(EngineError::CannotCall)
            } else {
                // Недостаток стека не запрещает call — это будет all-in call.
                Ok(())
            }
        }

        ActionKind::Bet(amount) => {
            if !betting.current_bet.is_zero() {
                // Bet допустим только когда ставки ещё нет.
                return Err(EngineError::IllegalAction);
            }
            if amount.is_zero() {
                return Err(EngineError::IllegalAction);
            }
            if stack < *amount {
                return Err(EngineError::NotEnoughChips);
            }
            // Минимум — большой блайнд; меньше можно только всем стеком.
            if *amount < config.big_blind && *amount != stack {
                return Err(EngineError::BetTooSmall);
            }
            Ok(())
        }

        ActionKind::Raise(total_bet) => {
            if betting.current_bet.is_zero() {
                // Когда ставки нет — это bet, а не raise.
                return Err(EngineError::IllegalAction);
            }
            if *total_bet <= betting.current_bet {
                return Err(EngineError::IllegalAction);
            }

            let diff = *total_bet - seat.current_bet;
            if stack < diff {
                return Err(EngineError::NotEnoughChips);
            }

            let raise_size = *total_bet - betting.current_bet;
            // Недобор до min_raise допустим только как терминальный all-in.
            if raise_size < betting.min_raise && diff != stack {
                return Err(EngineError::RaiseTooSmall);
            }

            Ok(())
        }

        ActionKind::AllIn => {
            if stack.is_zero() {
                return Err(EngineError::IllegalAction);
            }
            Ok(())
        }
    }
}

/// Сколько фишек нужно добавить месту, чтобы уравнять текущую ставку.
pub fn diff_to_call(seat: &Seat, betting: &BettingState) -> Chips {
    if betting.current_bet <= seat.current_bet {
        Chips::ZERO
    } else {
        betting.current_bet - seat.current_bet
    }
}
