//! Root actions

use crate::user_location::UserLocationAction;

#[derive(slice_dispatch::Action, Clone, Debug, PartialEq)]
pub enum Action {
    #[action(forward)]
    UserLocation(UserLocationAction),

    AlertShow(String),
    AlertDismiss,

    Quit,
}

impl From<UserLocationAction> for Action {
    fn from(action: UserLocationAction) -> Self {
        Action::UserLocation(action)
    }
}
