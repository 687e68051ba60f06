//! Message blocks and the interactive views attached to them.
//!
//! A panel is an ordered list of `MessageBlock`s, one Discord message each. Views are
//! rendered to rows of buttons; `ViewSignature` is the comparable form of those rows, read
//! back from existing messages so unchanged blocks are never re-edited.

use crate::server::{
    error::{internal::InternalError, AppError},
    util::parse::parse_u64_from_string,
};

/// Tile buttons on one claim view. A fifth row is left for the refresh button, so longer
/// tables spread their buttons over several blocks.
pub const MAX_TILE_BUTTONS: usize = 20;
const BUTTONS_PER_ROW: usize = 5;
const CUSTOM_ID_PREFIX: &str = "planner";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonTone {
    Primary,
    Secondary,
    Success,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonSignature {
    pub custom_id: String,
    pub label: String,
    pub tone: ButtonTone,
    pub disabled: bool,
}

impl ButtonSignature {
    fn new(action: PanelAction, label: impl Into<String>, tone: ButtonTone) -> Self {
        Self {
            custom_id: action.custom_id(),
            label: label.into(),
            tone,
            disabled: false,
        }
    }
}

/// Rows of buttons attached to a message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewSignature {
    pub rows: Vec<Vec<ButtonSignature>>,
}

impl ViewSignature {
    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(|row| row.is_empty())
    }
}

/// Claim toggles for the banners listed in one tile table block.
#[derive(Debug, Clone, PartialEq)]
pub struct UserView {
    pub planner_channel_id: u64,
    /// `(tile, claimed)` in table order.
    pub tiles: Vec<(String, bool)>,
    /// Only the last table block carries the refresh button.
    pub refresh: bool,
}

/// Controls shown under the control panel block.
#[derive(Debug, Clone, PartialEq)]
pub struct AdminView {
    pub planner_channel_id: u64,
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum PanelView {
    #[default]
    None,
    User(UserView),
    Admin(AdminView),
}

impl PanelView {
    /// Renders the view to button rows.
    pub fn signature(&self) -> ViewSignature {
        match self {
            PanelView::None => ViewSignature::default(),
            PanelView::User(view) => {
                let buttons: Vec<ButtonSignature> = view
                    .tiles
                    .iter()
                    .take(MAX_TILE_BUTTONS)
                    .map(|(tile, claimed)| {
                        ButtonSignature::new(
                            PanelAction::ToggleClaim {
                                planner_channel_id: view.planner_channel_id,
                                tile: tile.clone(),
                            },
                            tile.clone(),
                            if *claimed {
                                ButtonTone::Primary
                            } else {
                                ButtonTone::Secondary
                            },
                        )
                    })
                    .collect();

                let mut rows: Vec<Vec<ButtonSignature>> = buttons
                    .chunks(BUTTONS_PER_ROW)
                    .map(|chunk| chunk.to_vec())
                    .collect();
                if view.refresh {
                    rows.push(vec![ButtonSignature::new(
                        PanelAction::Refresh {
                            planner_channel_id: view.planner_channel_id,
                        },
                        "Refresh",
                        ButtonTone::Secondary,
                    )]);
                }

                ViewSignature { rows }
            }
            PanelView::Admin(view) => {
                let toggle = if view.is_active {
                    ("Turn off pings", ButtonTone::Danger)
                } else {
                    ("Turn on pings", ButtonTone::Success)
                };

                let forms: Vec<ButtonSignature> = FormKind::ALL
                    .iter()
                    .map(|kind| {
                        ButtonSignature::new(
                            PanelAction::OpenForm {
                                planner_channel_id: view.planner_channel_id,
                                kind: *kind,
                            },
                            kind.title(),
                            ButtonTone::Secondary,
                        )
                    })
                    .collect();

                ViewSignature {
                    rows: vec![
                        vec![
                            ButtonSignature::new(
                                PanelAction::ToggleActive {
                                    planner_channel_id: view.planner_channel_id,
                                },
                                toggle.0,
                                toggle.1,
                            ),
                            ButtonSignature::new(
                                PanelAction::Refresh {
                                    planner_channel_id: view.planner_channel_id,
                                },
                                "Refresh panel",
                                ButtonTone::Secondary,
                            ),
                        ],
                        forms,
                    ],
                }
            }
        }
    }
}

/// Content of one Discord message.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageBlock {
    pub content: String,
    pub view: PanelView,
}

impl MessageBlock {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            view: PanelView::None,
        }
    }

    pub fn with_view(content: impl Into<String>, view: PanelView) -> Self {
        Self {
            content: content.into(),
            view,
        }
    }
}

/// Text input of an admin form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormField {
    pub custom_id: &'static str,
    pub label: &'static str,
    pub placeholder: &'static str,
    pub required: bool,
}

pub const FIELD_TILE: &str = "tile";
pub const FIELD_EXPIRES_IN: &str = "expires_in";
pub const FIELD_CLAIMS_CHANNEL: &str = "claims_channel";
pub const FIELD_PING_CHANNEL: &str = "ping_channel";
pub const FIELD_TEAM_ROLE: &str = "team_role";

const CONFIGURE_FIELDS: [FormField; 3] = [
    FormField {
        custom_id: FIELD_CLAIMS_CHANNEL,
        label: "Tile claim channel",
        placeholder: "Channel id or mention, blank to keep",
        required: false,
    },
    FormField {
        custom_id: FIELD_PING_CHANNEL,
        label: "Ping channel",
        placeholder: "Channel id or mention, blank to keep",
        required: false,
    },
    FormField {
        custom_id: FIELD_TEAM_ROLE,
        label: "Team role",
        placeholder: "Role id or mention, blank to keep",
        required: false,
    },
];

const FORCE_UNCLAIM_FIELDS: [FormField; 1] = [FormField {
    custom_id: FIELD_TILE,
    label: "Tile",
    placeholder: "MRX",
    required: true,
}];

const EDIT_TILE_TIME_FIELDS: [FormField; 2] = [
    FormField {
        custom_id: FIELD_TILE,
        label: "Tile",
        placeholder: "MRX",
        required: true,
    },
    FormField {
        custom_id: FIELD_EXPIRES_IN,
        label: "Decays in (hours:minutes)",
        placeholder: "5:30",
        required: true,
    },
];

/// Admin forms opened from the control panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Configure,
    ForceUnclaim,
    EditTileTime,
}

impl FormKind {
    pub const ALL: [FormKind; 3] = [
        FormKind::Configure,
        FormKind::ForceUnclaim,
        FormKind::EditTileTime,
    ];

    fn key(&self) -> &'static str {
        match self {
            FormKind::Configure => "config",
            FormKind::ForceUnclaim => "unclaim",
            FormKind::EditTileTime => "time",
        }
    }

    fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.key() == key)
    }

    pub fn title(&self) -> &'static str {
        match self {
            FormKind::Configure => "Configure",
            FormKind::ForceUnclaim => "Force unclaim",
            FormKind::EditTileTime => "Edit tile time",
        }
    }

    pub fn fields(&self) -> &'static [FormField] {
        match self {
            FormKind::Configure => &CONFIGURE_FIELDS,
            FormKind::ForceUnclaim => &FORCE_UNCLAIM_FIELDS,
            FormKind::EditTileTime => &EDIT_TILE_TIME_FIELDS,
        }
    }
}

/// Button press on a panel, decoded from the component custom id.
///
/// Forms opened by `OpenForm` are submitted under the same custom id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelAction {
    ToggleClaim { planner_channel_id: u64, tile: String },
    Refresh { planner_channel_id: u64 },
    ToggleActive { planner_channel_id: u64 },
    OpenForm { planner_channel_id: u64, kind: FormKind },
}

impl PanelAction {
    pub fn custom_id(&self) -> String {
        match self {
            PanelAction::ToggleClaim {
                planner_channel_id,
                tile,
            } => format!("{}:claim:{}:{}", CUSTOM_ID_PREFIX, planner_channel_id, tile),
            PanelAction::Refresh { planner_channel_id } => {
                format!("{}:refresh:{}", CUSTOM_ID_PREFIX, planner_channel_id)
            }
            PanelAction::ToggleActive { planner_channel_id } => {
                format!("{}:toggle:{}", CUSTOM_ID_PREFIX, planner_channel_id)
            }
            PanelAction::OpenForm {
                planner_channel_id,
                kind,
            } => format!(
                "{}:form:{}:{}",
                CUSTOM_ID_PREFIX,
                planner_channel_id,
                kind.key()
            ),
        }
    }

    /// Decodes a component custom id.
    ///
    /// # Returns
    /// - `Ok(PanelAction)` - Id was issued by a panel view
    /// - `Err(AppError::InternalErr)` - Unknown id or malformed channel id
    pub fn parse(custom_id: &str) -> Result<Self, AppError> {
        let unknown = || InternalError::UnknownComponent(custom_id.to_string());
        let mut parts = custom_id.splitn(4, ':');

        if parts.next() != Some(CUSTOM_ID_PREFIX) {
            return Err(unknown().into());
        }
        let kind = parts.next().ok_or_else(unknown)?;
        let planner_channel_id =
            parse_u64_from_string(parts.next().ok_or_else(unknown)?.to_string())?;
        let rest = parts.next();

        match (kind, rest) {
            ("claim", Some(tile)) if !tile.is_empty() => Ok(PanelAction::ToggleClaim {
                planner_channel_id,
                tile: tile.to_string(),
            }),
            ("refresh", None) => Ok(PanelAction::Refresh { planner_channel_id }),
            ("toggle", None) => Ok(PanelAction::ToggleActive { planner_channel_id }),
            ("form", Some(key)) => {
                let kind = FormKind::from_key(key).ok_or_else(unknown)?;
                Ok(PanelAction::OpenForm {
                    planner_channel_id,
                    kind,
                })
            }
            _ => Err(unknown().into()),
        }
    }

}
