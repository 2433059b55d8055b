// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! SeaORM entity definitions.
//!
//! Enumerated columns (`kind`, `currency`, `status`) are stored as text and
//! converted to the enums in `shared-types` at the repository boundary.

pub mod consumable_item;
pub mod equip_item;
pub mod game_profile;
pub mod item_def;
pub mod sell_order;
pub mod user;

pub mod prelude {
    //! Entity re-exports under conventional aliases.

    pub use super::consumable_item::Entity as ConsumableItem;
    pub use super::equip_item::Entity as EquipItem;
    pub use super::game_profile::Entity as GameProfile;
    pub use super::item_def::Entity as ItemDef;
    pub use super::sell_order::Entity as SellOrder;
    pub use super::user::Entity as User;
}
