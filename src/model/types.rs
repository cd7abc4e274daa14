//! Core type definitions for the application

/// Which page of the UI is currently shown
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Search,
    TabById,
    Manual,
}

impl Page {
    pub fn next(self) -> Self {
        match self {
            Page::Search => Page::TabById,
            Page::TabById => Page::Manual,
            Page::Manual => Page::Search,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Page::Search => Page::Manual,
            Page::TabById => Page::Search,
            Page::Manual => Page::TabById,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Page::Search => "Search Tabs",
            Page::TabById => "Tab by ID",
            Page::Manual => "Manual Submission",
        }
    }

    pub const ALL: [Page; 3] = [Page::Search, Page::TabById, Page::Manual];
}

/// Which input of the manual submission form has focus
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ManualField {
    #[default]
    Song,
    Artist,
    Content,
}

impl ManualField {
    pub fn next(self) -> Self {
        match self {
            Self::Song => Self::Artist,
            Self::Artist => Self::Content,
            Self::Content => Self::Song,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Song => Self::Content,
            Self::Artist => Self::Song,
            Self::Content => Self::Artist,
        }
    }
}

/// Input state for the three front pages
#[derive(Clone, Debug, Default)]
pub struct UiState {
    pub active_page: Page,
    pub tab_id_input: String,
    pub manual_song: String,
    pub manual_artist: String,
    pub manual_content: String,
    pub manual_focus: ManualField,
    pub show_help_popup: bool,
    /// `None` until the first health check settles
    pub backend_healthy: Option<bool>,
}

impl UiState {
    pub fn manual_field_mut(&mut self) -> &mut String {
        match self.manual_focus {
            ManualField::Song => &mut self.manual_song,
            ManualField::Artist => &mut self.manual_artist,
            ManualField::Content => &mut self.manual_content,
        }
    }

    pub fn clear_manual_form(&mut self) {
        self.manual_song.clear();
        self.manual_artist.clear();
        self.manual_content.clear();
        self.manual_focus = ManualField::Song;
    }
}
