pub mod id;
pub mod joined;
pub mod live;
pub(crate) mod payload;
pub mod permission;
pub mod role;

pub use id::{generate_id, ObserverId, RoomId, UserId};
pub use joined::{GiftRankEntry, JoinedInfo, PkInfo, SeatInfo, VirtualAppearance};
pub use live::{LiveType, MediaQuality, RoomSettings, StreamProfile};
pub use permission::PermissionBits;
pub use role::{Role, RoleAttrs, RoomOwner, UserInfo};
