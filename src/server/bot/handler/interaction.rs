//! Interaction handler.
//!
//! Panel buttons carry a `PanelAction` in their custom id and the admin forms they open are
//! submitted under the same id. The `/planner` command turns the channel it is used in into
//! a planner. Every interaction is answered with an ephemeral message so only the member
//! who triggered it sees the outcome.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serenity::all::{
    ActionRowComponent, ChannelId, CommandInteraction, ComponentInteraction, Context,
    CreateActionRow, CreateCommand, CreateInputText, CreateInteractionResponse,
    CreateInteractionResponseMessage, CreateModal, InputTextStyle, Interaction,
    ModalInteraction, Permissions,
};

use crate::server::{
    error::{planner::PlannerError, AppError},
    model::{
        discord::GuildMember,
        panel::{
            FormKind, PanelAction, FIELD_CLAIMS_CHANNEL, FIELD_EXPIRES_IN, FIELD_PING_CHANNEL,
            FIELD_TEAM_ROLE, FIELD_TILE,
        },
        planner::UpdatePlannerConfigParam,
    },
    service::{
        discord::{
            client::{guild_member_from, SerenityTransport},
            DiscordTransport,
        },
        planner::PlannerService,
    },
    state::PlannerState,
    util::parse::{parse_hours_minutes, parse_mention_id},
};

/// Name of the command creating a planner.
pub const COMMAND_NAME: &str = "planner";

const UNEXPECTED_ERROR: &str = "Something went wrong, please try again later.";
const MISSING_PERMISSION: &str = "You need the Manage Server permission to do this.";

/// Answer to a panel button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionReply {
    Message(String),
    /// Ask the member to fill in an admin form.
    Form { planner_channel_id: u64, kind: FormKind },
}

/// Command registered globally on ready.
pub fn planner_command() -> CreateCommand {
    CreateCommand::new(COMMAND_NAME)
        .description("Turn this channel into a CT planner")
        .default_member_permissions(Permissions::MANAGE_GUILD)
}

/// Handles the interaction_create event.
///
/// Panel components, admin form submissions and the planner command are handled inside
/// guilds, everything else is ignored.
///
/// # Arguments
/// - `state` - Shared planner state
/// - `ctx` - Discord context providing the HTTP client
/// - `interaction` - The interaction received from Discord
pub async fn handle_interaction_create(
    state: &PlannerState,
    ctx: Context,
    interaction: Interaction,
) {
    match interaction {
        Interaction::Component(component) => handle_component(state, &ctx, &component).await,
        Interaction::Modal(modal) => handle_modal(state, &ctx, &modal).await,
        Interaction::Command(command) if command.data.name == COMMAND_NAME => {
            handle_command(state, &ctx, &command).await
        }
        _ => {}
    }
}

async fn handle_component(state: &PlannerState, ctx: &Context, component: &ComponentInteraction) {
    let action = match PanelAction::parse(&component.data.custom_id) {
        Ok(action) => action,
        Err(e) => {
            tracing::debug!("Ignoring component {}: {}", component.data.custom_id, e);
            return;
        }
    };

    let (Some(guild_id), Some(member)) = (component.guild_id, component.member.as_ref()) else {
        return;
    };
    let can_manage = member
        .permissions
        .is_some_and(|permissions| permissions.manage_guild());
    let member = guild_member_from(member);

    let transport = SerenityTransport::new(ctx.http.clone());
    let reply = answer_action(
        state,
        &transport,
        guild_id.get(),
        &member,
        can_manage,
        action,
        Utc::now(),
    )
    .await;

    let response = match reply {
        ActionReply::Message(content) => ephemeral(content),
        ActionReply::Form {
            planner_channel_id,
            kind,
        } => CreateInteractionResponse::Modal(form_modal(planner_channel_id, kind)),
    };
    log_unanswered(
        component.channel_id,
        component.create_response(&ctx.http, response).await,
    );
}

async fn handle_modal(state: &PlannerState, ctx: &Context, modal: &ModalInteraction) {
    let Ok(PanelAction::OpenForm {
        planner_channel_id,
        kind,
    }) = PanelAction::parse(&modal.data.custom_id)
    else {
        tracing::debug!("Ignoring form {}", modal.data.custom_id);
        return;
    };
    let Some(member) = modal.member.as_ref() else {
        return;
    };
    let can_manage = member
        .permissions
        .is_some_and(|permissions| permissions.manage_guild());

    let transport = SerenityTransport::new(ctx.http.clone());
    let answer = answer_form(
        state,
        &transport,
        can_manage,
        planner_channel_id,
        kind,
        &form_inputs(modal),
        Utc::now(),
    )
    .await;

    log_unanswered(
        modal.channel_id,
        modal.create_response(&ctx.http, ephemeral(answer)).await,
    );
}

async fn handle_command(state: &PlannerState, ctx: &Context, command: &CommandInteraction) {
    let Some(member) = command.member.as_ref() else {
        return;
    };
    let can_manage = member
        .permissions
        .is_some_and(|permissions| permissions.manage_guild());

    let transport = SerenityTransport::new(ctx.http.clone());
    let answer = answer_command(
        state,
        &transport,
        can_manage,
        command.channel_id.get(),
        Utc::now(),
    )
    .await;

    log_unanswered(
        command.channel_id,
        command.create_response(&ctx.http, ephemeral(answer)).await,
    );
}

/// Runs the action behind a panel button and returns the answer shown to the member.
///
/// Rejections are answered with their message, other failures are logged and answered
/// with a generic message.
///
/// # Arguments
/// - `guild_id` - Guild the panel lives in
/// - `member` - Member who clicked
/// - `can_manage` - Whether the member may administer planners
/// - `action` - Decoded button action
pub async fn answer_action(
    state: &PlannerState,
    discord: &dyn DiscordTransport,
    guild_id: u64,
    member: &GuildMember,
    can_manage: bool,
    action: PanelAction,
    now: DateTime<Utc>,
) -> ActionReply {
    let service = PlannerService::new(state, discord);

    let result = match &action {
        PanelAction::ToggleClaim {
            planner_channel_id,
            tile,
        } => service
            .switch_tile_claim(guild_id, member, *planner_channel_id, tile, now)
            .await
            .map(|toggle| toggle.message()),
        PanelAction::Refresh { planner_channel_id } => service
            .send_panel(*planner_channel_id, now)
            .await
            .map(|()| "Panel refreshed.".to_string()),
        PanelAction::ToggleActive { .. } | PanelAction::OpenForm { .. } if !can_manage => {
            Ok(MISSING_PERMISSION.to_string())
        }
        PanelAction::ToggleActive { planner_channel_id } => service
            .toggle_active(*planner_channel_id, now)
            .await
            .map(|is_active| {
                if is_active {
                    "The planner is active again.".to_string()
                } else {
                    "The planner is paused, no pings will be sent.".to_string()
                }
            }),
        PanelAction::OpenForm {
            planner_channel_id,
            kind,
        } => {
            return ActionReply::Form {
                planner_channel_id: *planner_channel_id,
                kind: *kind,
            }
        }
    };

    ActionReply::Message(answer_text(result, &action, member.user_id))
}

/// Applies a submitted admin form and returns the answer shown to the member.
///
/// Blank configuration fields are left unchanged.
///
/// # Arguments
/// - `can_manage` - Whether the member may administer planners
/// - `planner_channel_id` - Planner the form was opened from
/// - `kind` - Submitted form
/// - `inputs` - Field id to the text typed in
pub async fn answer_form(
    state: &PlannerState,
    discord: &dyn DiscordTransport,
    can_manage: bool,
    planner_channel_id: u64,
    kind: FormKind,
    inputs: &HashMap<String, String>,
    now: DateTime<Utc>,
) -> String {
    if !can_manage {
        return MISSING_PERMISSION.to_string();
    }

    let service = PlannerService::new(state, discord);
    let result = submit_form(&service, planner_channel_id, kind, inputs, now).await;

    answer_text(result, &kind, planner_channel_id)
}

async fn submit_form(
    service: &PlannerService<'_>,
    planner_channel_id: u64,
    kind: FormKind,
    inputs: &HashMap<String, String>,
    now: DateTime<Utc>,
) -> Result<String, AppError> {
    let field = |id: &str| {
        inputs
            .get(id)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
    };
    let id_field = |id: &str| -> Result<Option<u64>, AppError> {
        field(id)
            .map(|value| {
                parse_mention_id(value).ok_or_else(|| PlannerError::InvalidId(value.to_string()))
            })
            .transpose()
            .map_err(AppError::from)
    };
    let tile = field(FIELD_TILE).unwrap_or_default().to_uppercase();

    match kind {
        FormKind::Configure => {
            let param = UpdatePlannerConfigParam {
                claims_channel_id: id_field(FIELD_CLAIMS_CHANNEL)?,
                ping_channel_id: id_field(FIELD_PING_CHANNEL)?,
                ping_role_id: id_field(FIELD_TEAM_ROLE)?,
                ..UpdatePlannerConfigParam::new(planner_channel_id)
            };
            service.configure_planner(param, now).await?;
            Ok("The planner configuration was updated.".to_string())
        }
        FormKind::ForceUnclaim => {
            let previous = service.force_unclaim(planner_channel_id, &tile, now).await?;
            Ok(format!("`{}` is no longer claimed by <@{}>.", tile, previous))
        }
        FormKind::EditTileTime => {
            let raw = field(FIELD_EXPIRES_IN).unwrap_or_default();
            let expires_in = parse_hours_minutes(raw)
                .ok_or_else(|| PlannerError::InvalidDuration(raw.to_string()))?;
            let edit = service
                .edit_tile_time(planner_channel_id, &tile, now + expires_in, now)
                .await?;
            Ok(edit.message())
        }
    }
}

/// Turns a channel into a planner and returns the answer shown to the member.
pub async fn answer_command(
    state: &PlannerState,
    discord: &dyn DiscordTransport,
    can_manage: bool,
    channel_id: u64,
    now: DateTime<Utc>,
) -> String {
    if !can_manage {
        return MISSING_PERMISSION.to_string();
    }

    let result = PlannerService::new(state, discord)
        .add_planner(channel_id, now)
        .await
        .map(|_| "This channel is now a CT planner.".to_string());

    answer_text(result, &COMMAND_NAME, channel_id)
}

/// Shows rejections as they are and hides other failures behind a generic message.
fn answer_text(
    result: Result<String, AppError>,
    what: &dyn std::fmt::Debug,
    id: u64,
) -> String {
    match result {
        Ok(answer) => answer,
        Err(AppError::PlannerErr(rejection)) => rejection.to_string(),
        Err(e) => {
            tracing::error!("Failed to handle {:?} for {}: {}", what, id, e);
            UNEXPECTED_ERROR.to_string()
        }
    }
}

fn form_modal(planner_channel_id: u64, kind: FormKind) -> CreateModal {
    let custom_id = PanelAction::OpenForm {
        planner_channel_id,
        kind,
    }
    .custom_id();
    let rows = kind
        .fields()
        .iter()
        .map(|field| {
            CreateActionRow::InputText(
                CreateInputText::new(InputTextStyle::Short, field.label, field.custom_id)
                    .placeholder(field.placeholder)
                    .required(field.required),
            )
        })
        .collect();

    CreateModal::new(custom_id, kind.title()).components(rows)
}

/// Text typed in each input of a submitted form, by field id.
fn form_inputs(modal: &ModalInteraction) -> HashMap<String, String> {
    modal
        .data
        .components
        .iter()
        .flat_map(|row| row.components.iter())
        .filter_map(|component| match component {
            ActionRowComponent::InputText(input) => input
                .value
                .clone()
                .map(|value| (input.custom_id.clone(), value)),
            _ => None,
        })
        .collect()
}

fn ephemeral(content: String) -> CreateInteractionResponse {
    CreateInteractionResponse::Message(
        CreateInteractionResponseMessage::new()
            .content(content)
            .ephemeral(true),
    )
}

fn log_unanswered(channel_id: ChannelId, result: Result<(), serenity::Error>) {
    if let Err(e) = result {
        tracing::error!(
            "Failed to answer interaction in channel {}: {:?}",
            channel_id,
            e
        );
    }
}
