use ai360_core::profile::{GUEST_EMAIL, GUEST_NAME, QuizAnswers, UserProfile};
use ai360_core::views::AppView;
use ai360_store::{KeyValueStore, SessionStore};
use anyhow::{Context, bail};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::{ProfileCommands, ProfileSetArgs};
use crate::context::AppContext;
use crate::output::{self, TableOptions, table};

#[derive(Debug, Serialize)]
pub struct ProfileReport {
    pub view: AppView,
    pub profile: Option<UserProfile>,
}

impl ProfileReport {
    fn table(&self, options: TableOptions) -> String {
        let Some(profile) = &self.profile else {
            return format!("No profile stored (view: {:?})", self.view);
        };
        let field = |v: &Option<String>| v.clone().unwrap_or_else(|| "N/A".to_string());
        let access = if profile.is_guest() {
            "Guest Access"
        } else {
            "Verified Profile"
        };
        table::render_pairs(
            &[
                ("name", profile.name.clone()),
                ("email", profile.email.clone()),
                ("age", field(&profile.age)),
                ("gender", field(&profile.gender)),
                ("conditions", field(&profile.conditions)),
                ("goal", field(&profile.goal)),
                ("access", access.to_string()),
                ("view", format!("{:?}", self.view)),
            ],
            options,
        )
    }
}

/// Handle `ai360 profile`.
pub fn handle(action: &ProfileCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let session = ctx.session();
    let report = match action {
        ProfileCommands::Show => ProfileReport {
            view: session.current_view(),
            profile: session.load_profile(),
        },
        ProfileCommands::Set(args) => set(&session, args)?,
        ProfileCommands::Logout => ProfileReport {
            view: session.logout().context("failed to remove stored profile")?,
            profile: None,
        },
    };
    output::output(&report, flags.format, ProfileReport::table)
}

fn answers(args: &ProfileSetArgs) -> QuizAnswers {
    QuizAnswers {
        age: args.age.clone(),
        gender: args.gender.clone(),
        conditions: args.conditions.clone(),
        goal: args.goal.clone(),
    }
}

/// Sign up (with `--name`/`--email` or `--guest`) or, with neither, update
/// the quiz answers of the stored profile.
fn set<S: KeyValueStore>(
    session: &SessionStore<S>,
    args: &ProfileSetArgs,
) -> anyhow::Result<ProfileReport> {
    let identity = if args.guest {
        Some((GUEST_NAME, GUEST_EMAIL))
    } else {
        match (args.name.as_deref(), args.email.as_deref()) {
            (Some(name), Some(email)) => Some((name, email)),
            (None, None) => None,
            _ => bail!("--name and --email must be given together"),
        }
    };

    match identity {
        Some((name, email)) => {
            let (profile, view) = session.complete_onboarding(name, email, answers(args))?;
            Ok(ProfileReport {
                view,
                profile: Some(profile),
            })
        }
        None => {
            let profile = session.update_profile(answers(args))?;
            Ok(ProfileReport {
                view: session.current_view(),
                profile: Some(profile),
            })
        }
    }
}
