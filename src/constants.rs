/// Title carried by every new-transfer push notification.
pub const TRANSFER_NOTIFICATION_TITLE: &str = "Nuevo traslado registrado";

/// Page size used by the admin transfer history listing.
pub const HISTORY_PAGE_SIZE: i64 = 20;

/// Public client application key presented to the push provider when
/// requesting a device token. Deployment-time constant, shared by every
/// client; not per-user.
pub const PUSH_CLIENT_KEY: &str =
    "BGtXSlLIk_NTIBMqr5lLRfCOvudeam-u4jzXDjg_H2DfGAJpawM2ioXZNPhfU7caKWhceGE2XwPCHdTnNdLdWlY";
