//! Static rules document plus the report modal.

use super::{Container, Modal, PageContext, PageEvent};
use crate::api::ApiClient;
use crate::entities::ReportKind;
use crate::forms::{FormError, ReportForm};
use crate::state::AppState;
use crate::tasks::{Envelope, TaskScope};
use std::time::Duration;

/// One numbered section of the rules document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleSection {
    pub heading: &'static str,
    pub rules: &'static [&'static str],
}

pub const RULES_TITLE: &str = "Tournament Rules & Regulations";

pub const RULES_LEAD: &str = "These rules govern tournament eligibility, registration, match \
    format, player conduct, scoring, disputes and anti-cheat policies. All participants must \
    read and agree to these terms before registering.";

pub const RULES_FOOTER: &str = "Organizers reserve the right to update rules; changes will be \
    announced on the tournament page.";

pub const RULE_SECTIONS: &[RuleSection] = &[
    RuleSection {
        heading: "1. Eligibility & Teams",
        rules: &[
            "Each team must register under a single captain with valid contact details.",
            "Team size and substitutes: a team consists of up to 5 starting players and up to 2 \
             substitutes unless otherwise specified.",
            "Players must not be concurrently registered to multiple teams in the same tournament.",
        ],
    },
    RuleSection {
        heading: "2. Registration & Fees",
        rules: &[
            "Entry fees must be paid by the published deadline to confirm registration.",
            "Late registrations may be accepted at organizer discretion with possible surcharge.",
        ],
    },
    RuleSection {
        heading: "3. Match Format & Scheduling",
        rules: &[
            "Match formats (bo1 / bo3 / round-robin / knockout) are defined per tournament and \
             communicated in the event brief.",
            "Matches must start at scheduled times. Teams unable to field a match within the \
             allotted grace period forfeit the match.",
        ],
    },
    RuleSection {
        heading: "4. Scoring & Advancement",
        rules: &[
            "Scoring rules (points, tiebreakers) are defined for each tournament and published in \
             the event page.",
            "Tiebreakers follow the published order: head-to-head → map difference → points scored.",
        ],
    },
    RuleSection {
        heading: "5. Conduct & Fair Play",
        rules: &[
            "Abusive, discriminatory, or toxic behavior is prohibited and may result in warnings, \
             suspensions, or bans.",
            "Cheating, exploiting, or using unauthorized tools is an immediate disqualification. \
             Evidence will be reviewed by organizers before final action.",
        ],
    },
    RuleSection {
        heading: "6. Match Reporting & Disputes",
        rules: &[
            "Match results must be reported by the winning team via the match-reporting flow \
             within the tournament UI.",
            "Disputes should be submitted with screenshots/logs; organizers may request \
             additional proof.",
        ],
    },
    RuleSection {
        heading: "7. Substitutions & Roster Changes",
        rules: &["Substitutions are allowed only as specified in the tournament rules and may \
                  require prior notification to organizers."],
    },
    RuleSection {
        heading: "8. Penalties & Appeals",
        rules: &[
            "Penalties range from warnings to match forfeits and tournament disqualification \
             depending on severity.",
            "Appeals may be submitted within the stated appeal window; final decisions rest with \
             organizers.",
        ],
    },
    RuleSection {
        heading: "9. Prizes & Payouts",
        rules: &["Prize distribution and payout timelines are published with the tournament \
                  specifics."],
    },
];

pub struct RulesPage {
    api: ApiClient,
    dismiss_delay: Duration,
    scope: TaskScope<PageEvent>,
    report: Option<Modal<ReportForm>>,
}

impl RulesPage {
    pub fn new(ctx: &PageContext) -> Self {
        Self {
            api: ctx.api.clone(),
            dismiss_delay: ctx.dismiss_delay,
            scope: ctx.scope(),
            report: None,
        }
    }

    pub fn report(&self) -> Option<&ReportForm> {
        self.report.as_ref().map(Modal::form)
    }

    pub fn report_mut(&mut self) -> Option<&mut ReportForm> {
        self.report.as_mut().map(Modal::form_mut)
    }

    /// Open a blank report modal of `kind`, replacing any open one.
    pub fn open_report(&mut self, kind: ReportKind) {
        self.report = Some(Modal::open(ReportForm::new(kind), self.scope.child()));
    }

    pub fn close_report(&mut self) {
        self.report = None;
    }

    pub fn submit_report(&mut self) -> Result<(), FormError> {
        let Some(modal) = self.report.as_mut() else {
            return Ok(());
        };
        let report = modal.form_mut().prepare()?;
        log::info!("submitting {} report", report.kind);
        let api = self.api.clone();
        modal.spawn(async move { PageEvent::Reported(api.report(&report).await) });
        Ok(())
    }
}

impl Container for RulesPage {
    fn mount(&mut self) {}

    fn owns(&self, envelope: &Envelope<PageEvent>) -> bool {
        self.scope.owns(envelope) || self.report.as_ref().is_some_and(|m| m.owns(envelope))
    }

    fn handle(&mut self, event: PageEvent, _state: &mut AppState) {
        match event {
            PageEvent::Reported(result) => {
                if let Some(modal) = self.report.as_mut()
                    && modal.form_mut().complete(result)
                {
                    let ticket = modal.form().ticket();
                    modal.dismiss_after(ticket, self.dismiss_delay);
                }
            }
            PageEvent::Dismiss(ticket) => {
                if self.report().is_some_and(|r| r.ticket() == ticket) {
                    self.report = None;
                }
            }
            other => log::debug!("rules page ignoring {other:?}"),
        }
    }

    fn has_modal(&self) -> bool {
        self.report.is_some()
    }

    fn close_modal(&mut self) -> bool {
        self.report.take().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::api::Method;
    use crate::forms::{FormMessage, ReportField};
    use serde_json::json;

    #[test]
    fn test_rules_document() {
        assert_eq!(RULE_SECTIONS.len(), 9);
        for (idx, section) in RULE_SECTIONS.iter().enumerate() {
            assert!(section.heading.starts_with(&format!("{}. ", idx + 1)));
            assert!(!section.rules.is_empty());
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_anonymous_report_then_dismiss() {
        let (ctx, mut rx, mock) = context();
        mock.reply(
            Method::Post,
            &url("report"),
            201,
            json!({"message": "Your bug report has been submitted successfully!"}),
        );
        let mut state = AppState::new();
        let mut page = RulesPage::new(&ctx);
        page.mount();

        page.open_report(ReportKind::Bug);
        assert_eq!(page.report().unwrap().title(), "Report a Bug");
        page.report_mut()
            .unwrap()
            .field_mut(ReportField::Description)
            .unwrap()
            .push_str("Standings page shows stale points");
        page.submit_report().unwrap();

        assert!(deliver(&mut rx, &mut page, &mut state).await);
        let body = mock.requests()[0].body.clone();
        assert_eq!(
            body,
            Some(json!({
                "type": "bug",
                "description": "Standings page shows stale points",
                "reporter_name": "Anonymous"
            }))
        );
        assert_eq!(
            page.report().unwrap().message(),
            Some(&FormMessage::success(
                "Your bug report has been submitted successfully!"
            ))
        );

        assert!(deliver(&mut rx, &mut page, &mut state).await);
        assert!(!page.has_modal());
    }

    #[tokio::test]
    async fn test_report_failure_keeps_input() {
        let (ctx, mut rx, mock) = context();
        mock.unreachable(Method::Post, &url("report"));
        let mut state = AppState::new();
        let mut page = RulesPage::new(&ctx);

        page.open_report(ReportKind::Player);
        let form = page.report_mut().unwrap();
        form.field_mut(ReportField::ReporterName)
            .unwrap()
            .push_str("Ada");
        form.field_mut(ReportField::Description)
            .unwrap()
            .push_str("Left mid-match");
        page.submit_report().unwrap();
        assert!(deliver(&mut rx, &mut page, &mut state).await);

        let form = page.report().unwrap();
        assert_eq!(
            form.message().unwrap().text,
            "Failed to submit report. Please try again."
        );
        assert_eq!(form.field(ReportField::Description), "Left mid-match");
        assert!(page.has_modal());
    }

    #[tokio::test]
    async fn test_empty_description_sends_nothing() {
        let (ctx, _rx, mock) = context();
        let mut page = RulesPage::new(&ctx);
        page.open_report(ReportKind::Rule);
        assert!(matches!(
            page.submit_report(),
            Err(FormError::Validation(_))
        ));
        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn test_reopen_starts_blank() {
        let (ctx, _rx, _mock) = context();
        let mut page = RulesPage::new(&ctx);
        page.open_report(ReportKind::Rule);
        page.report_mut()
            .unwrap()
            .field_mut(ReportField::Description)
            .unwrap()
            .push_str("draft");
        assert!(page.close_modal());

        page.open_report(ReportKind::Rule);
        assert_eq!(page.report().unwrap().field(ReportField::Description), "");
        assert!(page.report().unwrap().message().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_reopened_modal_survives_old_dismissal() {
        let (ctx, mut rx, mock) = context();
        mock.reply(
            Method::Post,
            &url("report"),
            201,
            json!({"message": "Thanks for the report"}),
        );
        let mut state = AppState::new();
        let mut page = RulesPage::new(&ctx);

        page.open_report(ReportKind::Rule);
        page.report_mut()
            .unwrap()
            .field_mut(ReportField::Description)
            .unwrap()
            .push_str("Allow substitutes");
        page.submit_report().unwrap();
        assert!(deliver(&mut rx, &mut page, &mut state).await);
        let old_ticket = page.report().unwrap().ticket();

        // Closed while the dismissal is pending, then opened again.
        page.close_report();
        page.open_report(ReportKind::Bug);
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(rx.try_recv().is_err());
        assert_eq!(page.report().unwrap().title(), "Report a Bug");

        page.handle(PageEvent::Dismiss(old_ticket), &mut state);
        assert!(page.has_modal());
    }
}
