//! Page view-model: CV content resolved against a locale, a theme and the
//! current list expansion. Serialised as-is by the JSON API and rendered to
//! HTML by [`super::html`].

use serde::Serialize;

use crate::behavior::session::skill_arrow_id;
use crate::behavior::show_more::TOP_SKILLS_COUNT;
use crate::behavior::{ListSection, ShowMore};
use crate::dom::RootElement;
use crate::format::{
    format_date, format_date_range, format_hierarchy_mode, language_level_classes,
    language_level_colors, language_level_number,
};
use crate::i18n::{Catalog, Locale};
use crate::models::cv::{ContactInfo, CvProfile, Skill};

// ────────────────────────────────────────────────────────────────────────────
// Expansion state
// ────────────────────────────────────────────────────────────────────────────

/// Which lists are expanded. Carried in the `expand` query parameter, never
/// persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionState {
    expanded: Vec<ListSection>,
}

impl ExpansionState {
    pub fn from_query(raw: Option<&str>) -> Self {
        ExpansionState {
            expanded: raw.map(ListSection::parse_list).unwrap_or_default(),
        }
    }

    pub fn is_expanded(&self, section: ListSection) -> bool {
        self.expanded.contains(&section)
    }

    /// Copy of this state with `section` flipped.
    pub fn toggled(&self, section: ListSection) -> Self {
        let mut expanded = self.expanded.clone();
        if let Some(pos) = expanded.iter().position(|s| *s == section) {
            expanded.remove(pos);
        } else {
            expanded.push(section);
        }
        ExpansionState { expanded }
    }

    /// Comma-separated section names in page order.
    pub fn query_value(&self) -> String {
        ListSection::ALL
            .into_iter()
            .filter(|s| self.is_expanded(*s))
            .map(ListSection::name)
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Page URL reproducing this state.
    pub fn href(&self) -> String {
        let value = self.query_value();
        if value.is_empty() {
            "/".to_string()
        } else {
            format!("/?expand={value}")
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// View types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct Labels {
    pub skip_to_content: String,
    pub footer: String,
    pub profile: String,
    pub details: String,
    pub languages: String,
    pub education: String,
    pub certifications: String,
    pub projects: String,
    pub email: String,
    pub address: String,
    pub country: String,
    pub nationality: String,
    pub theme_toggle: String,
    /// Name of the theme the toggle switches to.
    pub theme_target: String,
    pub language_select: String,
    pub language_apply: String,
    pub view_certificate: String,
}

/// A show-more list as rendered: the visible slice plus its toggle link.
#[derive(Debug, Clone, Serialize)]
pub struct ListView<T> {
    pub section: ListSection,
    pub title: String,
    pub items: Vec<T>,
    pub total: usize,
    pub expanded: bool,
    pub has_more: bool,
    pub toggle_label: String,
    pub toggle_href: String,
    pub live_region: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct SkillView {
    pub arrow_id: String,
    pub name: String,
    pub level: u8,
    /// Shown only after expanding.
    pub additional: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct LanguageView {
    pub name: String,
    pub level_label: String,
    pub level_number: u8,
    pub classes: &'static str,
    pub background: String,
    pub text_color: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PositionView {
    pub title: String,
    pub dates: String,
    pub descriptions: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CompanyView {
    pub company: String,
    pub positions: Vec<PositionView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EducationView {
    pub institution: String,
    pub degree: String,
    pub dates: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CertificationView {
    pub title: String,
    pub issued_by: String,
    pub issued: String,
    pub image: String,
    pub link: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectView {
    pub name: String,
    pub description: String,
    pub url: Option<String>,
    pub tech_stack: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecommendationView {
    pub full_name: String,
    pub job_position: String,
    pub posted: String,
    pub relation: String,
    pub comment: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LocaleOption {
    pub code: &'static str,
    pub name: &'static str,
    pub selected: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct PageView {
    pub lang: String,
    pub root_class: String,
    pub dark: bool,
    pub locale: Locale,
    pub title: String,
    pub labels: Labels,
    pub contact: ContactInfo,
    pub summary: String,
    pub skills: ListView<SkillView>,
    pub languages: Vec<LanguageView>,
    pub employment: ListView<CompanyView>,
    pub education: Vec<EducationView>,
    pub certifications: Vec<CertificationView>,
    pub projects: Vec<ProjectView>,
    pub recommendations: ListView<RecommendationView>,
    pub locales: Vec<LocaleOption>,
}

// ────────────────────────────────────────────────────────────────────────────
// Building
// ────────────────────────────────────────────────────────────────────────────

/// Inputs shared by every part of the page.
struct ViewContext<'a> {
    catalog: &'a Catalog,
    locale: Locale,
    expansion: &'a ExpansionState,
}

impl ViewContext<'_> {
    fn t(&self, key: &str) -> String {
        self.catalog.t(self.locale, key)
    }

    fn list<T, V>(
        &self,
        section: ListSection,
        list: ShowMore<T>,
        mut view: impl FnMut(&T) -> V,
    ) -> ListView<V> {
        let list = list.with_expanded(self.expansion.is_expanded(section));
        let toggle_key = if list.is_expanded() {
            "common.show_less"
        } else {
            "common.show_more"
        };
        ListView {
            section,
            title: self.t(&format!("sections.{}", section.name())),
            items: list.visible_items().iter().map(&mut view).collect(),
            total: list.len(),
            expanded: list.is_expanded(),
            has_more: list.has_more(),
            toggle_label: self.t(toggle_key),
            toggle_href: format!(
                "{}#{}-section",
                self.expansion.toggled(section).href(),
                section.name()
            ),
            live_region: section.live_region(),
        }
    }
}

/// Resolves the whole page. `root` carries the theme class and `lang`
/// already applied by the preference stores.
pub fn build_page_view(
    profile: &CvProfile,
    catalog: &Catalog,
    locale: Locale,
    root: &RootElement,
    dark: bool,
    expansion: &ExpansionState,
) -> PageView {
    let cx = ViewContext {
        catalog,
        locale,
        expansion,
    };

    let skills = ShowMore::sorted_by(profile.skills.clone(), TOP_SKILLS_COUNT, |a, b| {
        b.level.cmp(&a.level)
    });
    let mut skill_index = 0;
    let skills = cx.list(ListSection::Skills, skills, |skill: &Skill| {
        let view = SkillView {
            arrow_id: skill_arrow_id(skill_index),
            name: skill.name.clone(),
            level: skill.level,
            additional: skill_index >= TOP_SKILLS_COUNT,
        };
        skill_index += 1;
        view
    });

    let languages = profile
        .languages
        .iter()
        .map(|language| {
            let colors = language_level_colors(language.level, dark);
            LanguageView {
                name: cx.t(&language.name_key),
                level_label: cx.t(language.level.label_key()),
                level_number: language_level_number(language.level),
                classes: language_level_classes(language.level),
                background: colors.background.hex(),
                text_color: colors.text.hex(),
            }
        })
        .collect();

    let employment = cx.list(
        ListSection::Employment,
        ShowMore::new(profile.companies.clone(), ListSection::Employment.initial_count()),
        |company| CompanyView {
            company: company.company.clone(),
            positions: company
                .positions
                .iter()
                .map(|p| PositionView {
                    title: cx.t(&p.title_key),
                    dates: format_date_range(catalog, &p.start_date, p.end_date.as_deref(), locale),
                    descriptions: p.description_keys.iter().map(|k| cx.t(k)).collect(),
                })
                .collect(),
        },
    );

    let education = profile
        .education
        .iter()
        .map(|e| EducationView {
            institution: e.institution.clone(),
            degree: cx.t(&e.degree_key),
            dates: format_date_range(catalog, &e.start_date, e.end_date.as_deref(), locale),
        })
        .collect();

    let certifications = profile
        .certifications
        .iter()
        .map(|c| CertificationView {
            title: c.title.clone(),
            issued_by: catalog.t_with(
                locale,
                "common.issued_by",
                &[("issuer", c.issued_by.as_str())],
            ),
            issued: format_date(catalog, Some(c.issued_date.as_str()), locale),
            image: c.certificate_image.clone(),
            link: c.certificate_link.clone(),
        })
        .collect();

    let projects = profile
        .projects
        .iter()
        .map(|p| ProjectView {
            name: p.name.clone(),
            description: cx.t(&p.description_key),
            url: p.url.clone(),
            tech_stack: p.tech_stack.clone(),
        })
        .collect();

    let recommendations = cx.list(
        ListSection::Recommendations,
        ShowMore::new(
            profile.recommendations.clone(),
            ListSection::Recommendations.initial_count(),
        ),
        |r| RecommendationView {
            full_name: format!("{} {}", r.name, r.surname),
            job_position: r.job_position.clone(),
            posted: format_date(catalog, Some(r.post_date.as_str()), locale),
            relation: format_hierarchy_mode(
                catalog,
                r.hierarchy_mode,
                locale,
                &profile.contact.short_name,
            ),
            comment: cx.t(&r.comment_key),
        },
    );

    let labels = Labels {
        skip_to_content: cx.t("site.skip_to_content"),
        footer: cx.t("site.footer"),
        profile: cx.t("sections.profile"),
        details: cx.t("sections.details"),
        languages: cx.t("sections.languages"),
        education: cx.t("sections.education"),
        certifications: cx.t("sections.certifications"),
        projects: cx.t("sections.projects"),
        email: cx.t("details.email"),
        address: cx.t("details.address"),
        country: cx.t("details.country"),
        nationality: cx.t("details.nationality"),
        theme_toggle: cx.t("theme.toggle"),
        theme_target: cx.t(if dark { "theme.light" } else { "theme.dark" }),
        language_select: cx.t("language.select"),
        language_apply: cx.t("language.apply"),
        view_certificate: cx.t("common.view_certificate"),
    };

    PageView {
        lang: root.lang.clone().unwrap_or_else(|| locale.code().to_string()),
        root_class: root.class_attr(),
        dark,
        locale,
        title: format!("{} | {}", profile.contact.name, cx.t("site.title")),
        labels,
        contact: profile.contact.clone(),
        summary: cx.t(&profile.summary_key),
        skills,
        languages,
        employment,
        education,
        certifications,
        projects,
        recommendations,
        locales: Locale::ALL
            .into_iter()
            .map(|l| LocaleOption {
                code: l.code(),
                name: l.native_name(),
                selected: l == locale,
            })
            .collect(),
    }
}
