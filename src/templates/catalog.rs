/*!
 * Built-in legal template catalog.
 *
 * The catalog covers the four violation categories in a traditional public
 * forum plus designated-forum variants of the recording and removal claims.
 * Seeding is idempotent: rows that already exist are never overwritten, so
 * locally edited templates survive a re-seed.
 */

use anyhow::Result;
use log::{debug, info};
use serde::Serialize;

use crate::analysis::{ForumType, ViolationType};
use crate::database::models::LegalTemplateRecord;
use crate::database::Repository;

use ForumType::{DesignatedPublicForum as Designated, TraditionalPublicForum as Traditional};
use ViolationType::{
    ForcedToLeavePublic as Removal, InterferenceRecording as Recording,
    RetaliationProtectedSpeech as Retaliation, ThreatenedArrestPublic as Threat,
};

/// One catalog entry
#[derive(Debug, Clone, Copy)]
pub struct TemplateSeed {
    pub violation: ViolationType,
    pub location: ForumType,
    pub section: &'static str,
    pub text: &'static str,
}

impl TemplateSeed {
    pub fn to_record(&self) -> LegalTemplateRecord {
        LegalTemplateRecord::new(
            self.violation.as_str(),
            self.location.as_str(),
            self.section,
            self.text,
        )
    }
}

/// Result of seeding the catalog
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub created: usize,
    pub existing: usize,
}

macro_rules! jurisdiction {
    ($reason:literal) => {
        concat!(
            "This Court has jurisdiction over this action pursuant to 28 U.S.C. §§ 1331 and 1343(a)(3), as this action arises under the Constitution and laws of the United States, specifically 42 U.S.C. § 1983. Venue is proper in this district under 28 U.S.C. § 1391(b)(2) because ",
            $reason
        )
    };
}

/// Every built-in template
pub const SEED_TEMPLATES: &[TemplateSeed] = &[
    // Threatened arrest
    TemplateSeed {
        violation: Threat,
        location: Traditional,
        section: "jurisdiction",
        text: jurisdiction!("a substantial part of the events occurred in this judicial district."),
    },
    TemplateSeed {
        violation: Threat,
        location: Traditional,
        section: "claims",
        text: "COUNT I - VIOLATION OF FIRST AMENDMENT RIGHTS (42 U.S.C. § 1983)\n\nDefendants violated Plaintiff's First Amendment rights by imposing a prior restraint on protected speech and newsgathering activities. The threat of arrest constitutes a prior restraint, which is presumptively unconstitutional. The location constitutes a traditional public forum where Plaintiff has clearly established rights to engage in protected speech and press activities.",
    },
    TemplateSeed {
        violation: Threat,
        location: Traditional,
        section: "prayer",
        text: "WHEREFORE, Plaintiff respectfully requests that this Court:\n\na) Enter declaratory judgment that Defendants' actions violated Plaintiff's First and Fourteenth Amendment rights;\nb) Award compensatory damages for violation of constitutional rights;\nc) Award punitive damages against individual Defendants;\nd) Award attorney's fees and costs pursuant to 42 U.S.C. § 1988;\ne) Grant such other relief as this Court deems just and proper.",
    },
    // Interference with recording
    TemplateSeed {
        violation: Recording,
        location: Traditional,
        section: "jurisdiction",
        text: jurisdiction!("the constitutional violations occurred within this judicial district."),
    },
    TemplateSeed {
        violation: Recording,
        location: Traditional,
        section: "facts",
        text: "On {{incident_date}}, Plaintiff was lawfully present at {{incident_location}}, a traditional public forum, exercising the clearly established constitutional right to record public officials in the performance of their duties.\n\nDefendants interfered with Plaintiff's recording activities without legal justification, violating Plaintiff's clearly established First Amendment rights.\n\nThe right to record police and public officials in public spaces was clearly established at the time of Defendants' conduct.",
    },
    TemplateSeed {
        violation: Recording,
        location: Traditional,
        section: "claims",
        text: "COUNT I - VIOLATION OF FIRST AMENDMENT RIGHT TO RECORD (42 U.S.C. § 1983)\n\nDefendants violated Plaintiff's clearly established First Amendment right to record police officers and public officials performing their duties in public. The right to record public officials is protected by the First Amendment. See Glik v. Cunniffe, 655 F.3d 78 (1st Cir. 2011); Turner v. Driver, 848 F.3d 678 (5th Cir. 2017); Fields v. City of Philadelphia, 862 F.3d 353 (3d Cir. 2017).\n\nDefendants' interference constituted a content-based restriction on protected speech in a traditional public forum, subject to strict scrutiny, which Defendants cannot satisfy.",
    },
    TemplateSeed {
        violation: Recording,
        location: Traditional,
        section: "prayer",
        text: "WHEREFORE, Plaintiff respectfully requests that this Court:\n\na) Enter declaratory judgment that Defendants' interference with Plaintiff's right to record violated the First and Fourteenth Amendments;\nb) Enter permanent injunctive relief prohibiting Defendants from interfering with the constitutional right to record in public spaces;\nc) Award compensatory damages for the violation of clearly established constitutional rights;\nd) Award punitive damages against individual Defendants for their deliberate indifference to constitutional rights;\ne) Award reasonable attorney's fees and costs pursuant to 42 U.S.C. § 1988;\nf) Grant such other relief as this Court deems just and proper.",
    },
    // Forced removal
    TemplateSeed {
        violation: Removal,
        location: Traditional,
        section: "jurisdiction",
        text: jurisdiction!("the unlawful exclusion occurred within this judicial district."),
    },
    TemplateSeed {
        violation: Removal,
        location: Traditional,
        section: "facts",
        text: "On {{incident_date}}, Plaintiff was lawfully present at {{incident_location}}, a traditional public forum, engaging in constitutionally protected activities including speech, assembly, and newsgathering.\n\nWithout lawful justification, Defendants forced Plaintiff to leave the public area, thereby excluding Plaintiff from a traditional public forum based on the content and viewpoint of Plaintiff's protected activities.\n\nPlaintiff's activities were peaceful, lawful, and posed no threat to public safety or substantial interference with other lawful uses of the forum.",
    },
    TemplateSeed {
        violation: Removal,
        location: Traditional,
        section: "claims",
        text: "COUNT I - EXCLUSION FROM PUBLIC FORUM (42 U.S.C. § 1983)\n\nDefendants violated Plaintiff's First Amendment rights by excluding Plaintiff from a traditional public forum without compelling justification. Traditional public forums are subject to the highest level of First Amendment protection, and content-based exclusions must survive strict scrutiny.\n\nDefendants' exclusion was based on disapproval of Plaintiff's protected speech and press activities, constituting impermissible viewpoint discrimination.",
    },
    TemplateSeed {
        violation: Removal,
        location: Traditional,
        section: "prayer",
        text: "WHEREFORE, Plaintiff respectfully requests that this Court:\n\na) Enter declaratory judgment that Defendants' exclusion of Plaintiff from public property violated the First and Fourteenth Amendments;\nb) Enter permanent injunctive relief prohibiting Defendants from excluding individuals from public forums based on protected speech activities;\nc) Award compensatory damages including damages for the violation of constitutional rights and emotional distress;\nd) Award punitive damages against individual Defendants;\ne) Award reasonable attorney's fees and costs pursuant to 42 U.S.C. § 1988;\nf) Grant such other relief as this Court deems just and proper.",
    },
    // Retaliation
    TemplateSeed {
        violation: Retaliation,
        location: Traditional,
        section: "jurisdiction",
        text: jurisdiction!("the retaliatory conduct occurred within this judicial district."),
    },
    TemplateSeed {
        violation: Retaliation,
        location: Traditional,
        section: "facts",
        text: "Plaintiff previously engaged in constitutionally protected speech and press activities. Subsequently, Defendants retaliated against Plaintiff because of these protected First Amendment activities.\n\nDefendants' retaliatory conduct was taken in direct response to Plaintiff's exercise of constitutional rights and was intended to deter future protected activity.\n\nDefendants' conduct would chill a person of ordinary firmness from continuing to engage in protected speech activities.",
    },
    TemplateSeed {
        violation: Retaliation,
        location: Traditional,
        section: "claims",
        text: "COUNT I - FIRST AMENDMENT RETALIATION (42 U.S.C. § 1983)\n\nDefendants violated Plaintiff's First Amendment rights by retaliating against Plaintiff for engaging in protected speech activities. To establish a First Amendment retaliation claim, Plaintiff must show: (1) constitutionally protected conduct, (2) retaliatory action that would deter a person of ordinary firmness from continuing the conduct, and (3) a causal connection between the protected conduct and the retaliatory action.\n\nPlaintiff's speech and press activities were constitutionally protected. Defendants' retaliatory actions would deter a person of ordinary firmness from continuing such activities. The temporal proximity and circumstances establish the causal connection.",
    },
    TemplateSeed {
        violation: Retaliation,
        location: Traditional,
        section: "prayer",
        text: "WHEREFORE, Plaintiff respectfully requests that this Court:\n\na) Enter declaratory judgment that Defendants' retaliation for protected speech violated the First Amendment;\nb) Enter permanent injunctive relief prohibiting Defendants from retaliating against individuals for engaging in protected speech activities;\nc) Award compensatory damages for the violation of constitutional rights and resulting harm;\nd) Award punitive damages against individual Defendants for their deliberate indifference to clearly established rights;\ne) Award reasonable attorney's fees and costs pursuant to 42 U.S.C. § 1988;\nf) Grant such other relief as this Court deems just and proper.",
    },
    // Designated public forum
    TemplateSeed {
        violation: Recording,
        location: Designated,
        section: "claims",
        text: "COUNT I - VIOLATION OF FIRST AMENDMENT RIGHT TO RECORD (42 U.S.C. § 1983)\n\nDefendants violated Plaintiff's clearly established First Amendment right to record in a designated public forum. The government has opened this location for public access and speech activities, creating a designated public forum subject to First Amendment protection.\n\nAny restrictions on recording in designated public forums must be content-neutral and narrowly tailored to serve significant governmental interests. Defendants' interference was content-based and not narrowly tailored.",
    },
    TemplateSeed {
        violation: Removal,
        location: Designated,
        section: "claims",
        text: "COUNT I - EXCLUSION FROM DESIGNATED PUBLIC FORUM (42 U.S.C. § 1983)\n\nDefendants violated Plaintiff's First Amendment rights by excluding Plaintiff from a designated public forum. The government has opened this location for public access and use, creating a designated public forum entitled to significant First Amendment protection.\n\nExclusions from designated public forums must be reasonable and viewpoint-neutral. Defendants' exclusion was based on hostility toward Plaintiff's protected activities and constituted impermissible viewpoint discrimination.",
    },
];

/// Insert every catalog entry that is not already stored
pub async fn seed_templates(repo: &Repository) -> Result<SeedReport> {
    let mut report = SeedReport::default();

    for seed in SEED_TEMPLATES {
        if repo.insert_template_if_absent(&seed.to_record()).await? {
            debug!(
                "Created template: {} for {} in {}",
                seed.section, seed.violation, seed.location
            );
            report.created += 1;
        } else {
            report.existing += 1;
        }
    }

    info!(
        "Template seeding complete. Created: {}, already existed: {}",
        report.created, report.existing
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const JURISDICTION_PREFIX: &str = "This Court has jurisdiction over this action pursuant to 28 U.S.C. §§ 1331 and 1343(a)(3), as this action arises under the Constitution and laws of the United States, specifically 42 U.S.C. § 1983. Venue is proper in this district under 28 U.S.C. § 1391(b)(2) because ";

    #[test]
    fn test_catalog_shouldHaveSeventeenUniqueEntries() {
        let keys: HashSet<(ViolationType, ForumType, &str)> = SEED_TEMPLATES
            .iter()
            .map(|seed| (seed.violation, seed.location, seed.section))
            .collect();
        assert_eq!(SEED_TEMPLATES.len(), 17);
        assert_eq!(keys.len(), 17);
    }

    #[test]
    fn test_catalog_jurisdictionTexts_shouldShareStatutoryPrefix() {
        for seed in SEED_TEMPLATES.iter().filter(|s| s.section == "jurisdiction") {
            assert!(seed.text.starts_with(JURISDICTION_PREFIX));
        }
    }

    #[test]
    fn test_catalog_claims_shouldCiteSection1983() {
        for seed in SEED_TEMPLATES.iter().filter(|s| s.section == "claims") {
            assert!(seed.text.contains("§ 1983"), "{:?}", seed.violation);
        }
    }

    #[tokio::test]
    async fn test_seedTemplates_calledTwice_shouldBeIdempotent() {
        let repo = Repository::new_in_memory().unwrap();

        let first = seed_templates(&repo).await.unwrap();
        assert_eq!(first, SeedReport { created: 17, existing: 0 });

        let second = seed_templates(&repo).await.unwrap();
        assert_eq!(second, SeedReport { created: 0, existing: 17 });
        assert_eq!(repo.list_templates().await.unwrap().len(), 17);
    }
}
