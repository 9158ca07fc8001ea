//! Root effects and the effect handler wiring them to the epics

use slice_dispatch::EffectContext;

use crate::action::Action;
use crate::api::UserLocationApi;
use crate::user_location::{UserLocationEffect, UserLocationEpics};

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    UserLocation(UserLocationEffect),
}

/// Run one effect: API calls become tasks, alerts become actions
pub fn handle_effect<C: UserLocationApi>(
    epics: &UserLocationEpics<C>,
    effect: Effect,
    ctx: &mut EffectContext<'_, Action>,
) {
    match effect {
        Effect::UserLocation(UserLocationEffect::Fetch) => epics.fetch(ctx.tasks()),
        Effect::UserLocation(UserLocationEffect::Create(payload)) => {
            epics.create(payload, ctx.tasks())
        }
        Effect::UserLocation(UserLocationEffect::Alert(message)) => {
            ctx.emit(Action::AlertShow(message))
        }
    }
}
