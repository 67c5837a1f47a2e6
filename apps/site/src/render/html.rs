//! Server-side HTML for the CV page.

use super::view::{ListView, PageView};
use crate::behavior::reveal::REVEAL_CLASS;
use crate::behavior::session::{HERO_ID, SKILLS_SECTION_ID};

pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

pub fn render_page(page: &PageView) -> String {
    let mut html = String::with_capacity(16 * 1024);
    html.push_str("<!DOCTYPE html>\n");
    html.push_str(&format!(
        r#"<html lang="{}" class="{}">"#,
        escape_html(&page.lang),
        escape_html(&page.root_class)
    ));
    html.push_str(&format!(
        r#"<head><meta charset="utf-8"><meta name="viewport" content="width=device-width, initial-scale=1"><title>{}</title></head>"#,
        escape_html(&page.title)
    ));
    html.push_str("<body>");
    html.push_str(&format!(
        r##"<a class="sr-only" href="#main-content">{}</a>"##,
        escape_html(&page.labels.skip_to_content)
    ));

    render_hero(&mut html, page);
    html.push_str(r#"<div class="cv-layout"><aside class="cv-sidebar">"#);
    render_details(&mut html, page);
    render_skills(&mut html, page);
    render_languages(&mut html, page);
    html.push_str(r#"</aside><main id="main-content" class="cv-article">"#);
    render_profile(&mut html, page);
    render_employment(&mut html, page);
    render_education(&mut html, page);
    render_certifications(&mut html, page);
    render_projects(&mut html, page);
    render_recommendations(&mut html, page);
    html.push_str("</main></div>");

    html.push_str(&format!(
        "<footer><p>{}</p></footer></body></html>",
        escape_html(&page.labels.footer)
    ));
    html
}

fn section_open(html: &mut String, id: &str, title: &str) {
    html.push_str(&format!(
        r#"<section id="{}" class="{REVEAL_CLASS}" aria-labelledby="{}-title"><h2 id="{}-title">{}</h2>"#,
        escape_html(id),
        escape_html(id),
        escape_html(id),
        escape_html(title)
    ));
}

fn render_hero(html: &mut String, page: &PageView) {
    let contact = &page.contact;
    html.push_str(&format!(r#"<header id="{HERO_ID}" class="hero">"#));
    html.push_str(&format!(
        r#"<img src="{}" alt="{}" width="160" height="160">"#,
        escape_html(&contact.profile_image),
        escape_html(&contact.name)
    ));
    html.push_str(&format!(
        "<h1>{}</h1><p>{}</p><p>{}</p>",
        escape_html(&contact.name),
        escape_html(&contact.job_title),
        escape_html(&contact.tech_stack)
    ));

    html.push_str(&format!(
        r#"<form method="post" action="/preferences/theme"><input type="hidden" name="theme" value="toggle"><button type="submit" aria-label="{}">{}</button></form>"#,
        escape_html(&page.labels.theme_toggle),
        escape_html(&page.labels.theme_target)
    ));

    html.push_str(&format!(
        r#"<form method="post" action="/preferences/locale"><label for="locale-select">{}</label><select id="locale-select" name="locale">"#,
        escape_html(&page.labels.language_select)
    ));
    for option in &page.locales {
        html.push_str(&format!(
            r#"<option value="{}"{}>{}</option>"#,
            option.code,
            if option.selected { " selected" } else { "" },
            escape_html(option.name)
        ));
    }
    html.push_str(&format!(
        r#"</select><button type="submit">{}</button></form>"#,
        escape_html(&page.labels.language_apply)
    ));
    html.push_str("</header>");
}

fn render_details(html: &mut String, page: &PageView) {
    let contact = &page.contact;
    let labels = &page.labels;
    section_open(html, "details-section", &labels.details);
    html.push_str("<dl>");
    html.push_str(&format!(
        r#"<dt>{}</dt><dd><a href="mailto:{}">{}</a></dd>"#,
        escape_html(&labels.email),
        escape_html(&contact.email),
        escape_html(&contact.email)
    ));
    for (label, value) in [
        (&labels.address, &contact.address),
        (&labels.country, &contact.country),
        (&labels.nationality, &contact.nationality),
    ] {
        html.push_str(&format!(
            "<dt>{}</dt><dd>{}</dd>",
            escape_html(label),
            escape_html(value)
        ));
    }
    html.push_str("</dl><ul>");
    for link in [&contact.linkedin, &contact.github] {
        html.push_str(&format!(
            r#"<li><a href="{}" rel="noopener" target="_blank">{}</a></li>"#,
            escape_html(&link.url),
            escape_html(&link.handle)
        ));
    }
    html.push_str("</ul></section>");
}

/// Live region plus the show-more link, when the list has hidden items.
fn render_list_footer<T>(html: &mut String, list: &ListView<T>) {
    if list.has_more {
        html.push_str(&format!(
            r#"<a class="show-more" href="{}" aria-expanded="{}">{}</a>"#,
            escape_html(&list.toggle_href),
            list.expanded,
            escape_html(&list.toggle_label)
        ));
    }
    html.push_str(&format!(
        r#"<div id="{}" class="sr-only" aria-live="polite" role="status"></div>"#,
        list.live_region
    ));
}

fn render_skills(html: &mut String, page: &PageView) {
    let skills = &page.skills;
    section_open(html, SKILLS_SECTION_ID, &skills.title);
    html.push_str("<ul>");
    for skill in &skills.items {
        let class = if skill.additional {
            r#" class="additional-skill""#
        } else {
            ""
        };
        html.push_str(&format!(
            r#"<li{}><span>{}</span><div class="skill-bar" role="meter" aria-valuemin="0" aria-valuemax="100" aria-valuenow="{}" aria-label="{}"><span id="{}" class="skill-arrow" style="left: {}%"></span></div></li>"#,
            class,
            escape_html(&skill.name),
            skill.level,
            escape_html(&skill.name),
            escape_html(&skill.arrow_id),
            skill.level
        ));
    }
    html.push_str("</ul>");
    render_list_footer(html, skills);
    html.push_str("</section>");
}

fn render_languages(html: &mut String, page: &PageView) {
    section_open(html, "languages-section", &page.labels.languages);
    html.push_str("<ul>");
    for language in &page.languages {
        html.push_str(&format!(
            r#"<li><span>{}</span> <span class="badge {}" data-level="{}">{}</span></li>"#,
            escape_html(&language.name),
            language.classes,
            language.level_number,
            escape_html(&language.level_label)
        ));
    }
    html.push_str("</ul></section>");
}

fn render_profile(html: &mut String, page: &PageView) {
    section_open(html, "profile-section", &page.labels.profile);
    html.push_str(&format!("<p>{}</p></section>", escape_html(&page.summary)));
}

fn render_employment(html: &mut String, page: &PageView) {
    let employment = &page.employment;
    section_open(html, "employment-section", &employment.title);
    for company in &employment.items {
        html.push_str(&format!(
            r#"<article class="{REVEAL_CLASS}"><h3>{}</h3>"#,
            escape_html(&company.company)
        ));
        for position in &company.positions {
            html.push_str(&format!(
                "<h4>{}</h4><p><time>{}</time></p><ul>",
                escape_html(&position.title),
                escape_html(&position.dates)
            ));
            for description in &position.descriptions {
                html.push_str(&format!("<li>{}</li>", escape_html(description)));
            }
            html.push_str("</ul>");
        }
        html.push_str("</article>");
    }
    render_list_footer(html, employment);
    html.push_str("</section>");
}

fn render_education(html: &mut String, page: &PageView) {
    if page.education.is_empty() {
        return;
    }
    section_open(html, "education-section", &page.labels.education);
    for education in &page.education {
        html.push_str(&format!(
            "<article><h3>{}</h3><p>{}</p><p><time>{}</time></p></article>",
            escape_html(&education.degree),
            escape_html(&education.institution),
            escape_html(&education.dates)
        ));
    }
    html.push_str("</section>");
}

fn render_certifications(html: &mut String, page: &PageView) {
    if page.certifications.is_empty() {
        return;
    }
    section_open(html, "certifications-section", &page.labels.certifications);
    for cert in &page.certifications {
        html.push_str(&format!(
            r#"<article><img src="{}" alt="" loading="lazy"><h3>{}</h3><p>{}</p><p><time>{}</time></p><a href="{}" rel="noopener" target="_blank">{}</a></article>"#,
            escape_html(&cert.image),
            escape_html(&cert.title),
            escape_html(&cert.issued_by),
            escape_html(&cert.issued),
            escape_html(&cert.link),
            escape_html(&page.labels.view_certificate)
        ));
    }
    html.push_str("</section>");
}

fn render_projects(html: &mut String, page: &PageView) {
    if page.projects.is_empty() {
        return;
    }
    section_open(html, "projects-section", &page.labels.projects);
    for project in &page.projects {
        html.push_str("<article>");
        match &project.url {
            Some(url) => html.push_str(&format!(
                r#"<h3><a href="{}" rel="noopener" target="_blank">{}</a></h3>"#,
                escape_html(url),
                escape_html(&project.name)
            )),
            None => html.push_str(&format!("<h3>{}</h3>", escape_html(&project.name))),
        }
        html.push_str(&format!("<p>{}</p>", escape_html(&project.description)));
        if !project.tech_stack.is_empty() {
            html.push_str("<ul class=\"tech-stack\">");
            for tech in &project.tech_stack {
                html.push_str(&format!("<li>{}</li>", escape_html(tech)));
            }
            html.push_str("</ul>");
        }
        html.push_str("</article>");
    }
    html.push_str("</section>");
}

fn render_recommendations(html: &mut String, page: &PageView) {
    let recommendations = &page.recommendations;
    section_open(html, "recommendations-section", &recommendations.title);
    for r in &recommendations.items {
        html.push_str(&format!(
            r#"<article class="{REVEAL_CLASS}"><blockquote><p>{}</p></blockquote><h3>{}</h3><p>{}</p><p>{} · <time>{}</time></p></article>"#,
            escape_html(&r.comment),
            escape_html(&r.full_name),
            escape_html(&r.job_position),
            escape_html(&r.relation),
            escape_html(&r.posted)
        ));
    }
    render_list_footer(html, recommendations);
    html.push_str("</section>");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::load_profile;
    use crate::dom::{DocumentRoot, RootElement};
    use crate::i18n::{Catalog, Locale};
    use crate::render::view::{build_page_view, ExpansionState};

    fn page(expand: Option<&str>) -> String {
        let profile = load_profile(None).unwrap();
        let catalog = Catalog::embedded().unwrap();
        let mut root = RootElement::default();
        root.set_root_class("dark", true);
        root.set_lang("es");
        let view = build_page_view(
            &profile,
            &catalog,
            Locale::Es,
            &root,
            true,
            &ExpansionState::from_query(expand),
        );
        render_page(&view)
    }

    #[test]
    fn test_escapes_html_entities() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
    }

    #[test]
    fn test_root_carries_lang_and_theme() {
        let html = page(None);
        assert!(html.starts_with("<!DOCTYPE html>\n<html lang=\"es\" class=\"dark\">"));
        assert!(html.contains(r#"<option value="es" selected>"#));
    }

    #[test]
    fn test_page_has_observed_regions() {
        let html = page(None);
        assert!(html.contains(r#"id="hero-section""#));
        assert!(html.contains(r#"id="skills-section""#));
        for region in ["skills-live", "employment-live", "recommendations-live"] {
            assert!(html.contains(&format!(r#"id="{region}""#)), "missing {region}");
        }
        assert!(html.contains(r#"class="scroll-reveal""#));
        assert!(html.contains(r#"id="skill-arrow-0""#));
        assert!(!html.contains(r#"id="skill-arrow-5""#));
    }

    #[test]
    fn test_expanded_page_renders_additional_skills() {
        let html = page(Some("skills"));
        assert!(html.contains(r#"id="skill-arrow-5""#));
        assert!(html.contains(r#"class="additional-skill""#));
        assert!(html.contains(r##"href="/#skills-section""##));
    }
}
