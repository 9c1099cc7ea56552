use strum::{Display, EnumString};

/// Spotify authorization scopes used by this tool.
///
/// String forms follow the names in the Spotify scopes documentation and
/// must match exactly what the accounts service validates against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
pub enum Scope {
    #[strum(serialize = "user-read-playback-state")]
    UserReadPlaybackState,
    #[strum(serialize = "user-modify-playback-state")]
    UserModifyPlaybackState,
    #[strum(serialize = "user-read-currently-playing")]
    UserReadCurrentlyPlaying,

    #[strum(serialize = "playlist-read-private")]
    PlaylistReadPrivate,
    #[strum(serialize = "playlist-read-collaborative")]
    PlaylistReadCollaborative,
    #[strum(serialize = "playlist-modify-public")]
    PlaylistModifyPublic,
    #[strum(serialize = "playlist-modify-private")]
    PlaylistModifyPrivate,

    #[strum(serialize = "user-library-read")]
    UserLibraryRead,
    #[strum(serialize = "user-library-modify")]
    UserLibraryModify,
    #[strum(serialize = "user-top-read")]
    UserTopRead,

    #[strum(serialize = "user-read-private")]
    UserReadPrivate,
    #[strum(serialize = "user-read-email")]
    UserReadEmail,

    #[strum(serialize = "ugc-image-upload")]
    UgcImageUpload,
}

/// Scopes requested during authorization. Order is not significant to the
/// provider but is kept stable so the authorization URL stays readable.
pub const DEFAULT_SCOPES: &[Scope] = &[
    Scope::UserReadPlaybackState,
    Scope::UserModifyPlaybackState,
    Scope::UserReadCurrentlyPlaying,
    Scope::PlaylistReadPrivate,
    Scope::PlaylistReadCollaborative,
    Scope::PlaylistModifyPublic,
    Scope::PlaylistModifyPrivate,
    Scope::UserLibraryRead,
    Scope::UserLibraryModify,
    Scope::UserTopRead,
    Scope::UserReadPrivate,
    Scope::UserReadEmail,
    Scope::UgcImageUpload,
];

/// Join scopes with spaces, the separator Spotify expects in the
/// authorization URL.
pub fn join(scopes: &[Scope]) -> String {
    scopes
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<String>>()
        .join(" ")
}
