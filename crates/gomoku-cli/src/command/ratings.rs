use std::path::PathBuf;

use gomoku_adaptive::controller::RatingController;
use gomoku_engine::Side;

use crate::util;

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, derive_more::FromStr)]
pub enum RatingsAction {
    #[default]
    Show,
    Reset,
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct RatingsArg {
    /// `show` or `reset`
    #[arg(default_value = "show")]
    action: RatingsAction,
    /// Ratings file
    #[arg(long)]
    ratings: PathBuf,
    /// Rating constants (JSON)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn describe(controller: &RatingController) -> String {
    let history: String = controller
        .history()
        .iter()
        .map(|winner| match winner {
            Side::Human => 'H',
            Side::Computer => 'C',
        })
        .collect();
    format!(
        "human rating:    {} (streak {})\n\
         computer rating: {} (streak {})\n\
         difficulty:      {:.2}\n\
         recent results:  {}",
        controller.rating(Side::Human),
        controller.streak(Side::Human),
        controller.rating(Side::Computer),
        controller.streak(Side::Computer),
        controller.difficulty(),
        if history.is_empty() { "-" } else { history.as_str() },
    )
}

pub(crate) fn run(arg: &RatingsArg) -> anyhow::Result<()> {
    let RatingsArg {
        action,
        ratings,
        config,
    } = arg;

    let config = util::load_rating_config(config.as_deref())?;
    match action {
        RatingsAction::Show => {
            let controller = util::load_controller(config, Some(ratings.as_path()))?;
            println!("{}", describe(&controller));
        }
        RatingsAction::Reset => {
            let controller = RatingController::new(config)?;
            util::save_controller(&controller, ratings)?;
            eprintln!("Reset ratings in {}", ratings.display());
            println!("{}", describe(&controller));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_action() {
        assert_eq!("show".parse::<RatingsAction>().unwrap(), RatingsAction::Show);
        assert_eq!("reset".parse::<RatingsAction>().unwrap(), RatingsAction::Reset);
        assert!("delete".parse::<RatingsAction>().is_err());
    }

    #[test]
    fn test_describe_lists_history() {
        let mut controller = RatingController::default();
        assert!(describe(&controller).ends_with("recent results:  -"));
        controller.record_result(Side::Human);
        controller.record_result(Side::Computer);
        let text = describe(&controller);
        let human = format!("human rating:    {}", controller.rating(Side::Human));
        assert!(text.starts_with(&human));
        assert!(text.ends_with("recent results:  HC"));
    }
}
