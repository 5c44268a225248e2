use std::cell::Cell;
use std::rc::Rc;

use crate::{
    config::{ScriptStep, SimulationScript, StageConfig},
    controller::events::LoggedEvent,
    controller::interaction::PointerEvent,
    controller::registry::ResourceCounts,
    controller::viewport::ViewportAnimationController,
    dom::layout::{BoxLayout, LayoutMode, resolve_child_rects},
    foundation::core::{Rect, Size},
    foundation::error::ScrollweaveResult,
    page::contact::{
        ContactForm, ContactPayload, Field, FormError, LoggingSubmitHandler,
        RecordingSubmitHandler, SubmitHandler,
    },
    page::content::PageContent,
    page::faq::{Accordion, Cycle},
    page::map::{EmbedMapProvider, MapProvider, MapView},
    page::nav::{AnchorNavigator, NavOutcome},
    page::sections::{self, MountedSection},
};

/// Section names and heights, top to bottom.
const STACK: [(&str, f64); 11] = [
    ("nav", 80.0),
    ("hero", 800.0),
    ("partners", 560.0),
    ("features", 1400.0),
    ("products", 900.0),
    ("cta", 400.0),
    ("testimonials", 700.0),
    ("faq", 800.0),
    ("news", 800.0),
    ("contact", 900.0),
    ("footer", 300.0),
];

/// Fixed navigation bar height kept clear when jumping to an anchor.
const NAV_HEIGHT: f64 = 80.0;

const MAP_EMBED_URL: &str = "https://www.google.com/maps/embed/v1/place";

/// The smart-home landing page: every section mounted on one controller, plus the
/// non-animated widget state (slides, accordion, form, map).
pub struct LandingPage {
    content: PageContent,
    sections: Vec<MountedSection>,
    slide: Rc<Cell<Cycle>>,
    testimonial: Cycle,
    faq: Accordion,
    form: ContactForm,
    map: MapView,
    navigator: AnchorNavigator,
}

impl LandingPage {
    /// Lay out and mount every section on `ctl`.
    #[tracing::instrument(skip_all)]
    pub fn build(
        ctl: &mut ViewportAnimationController,
        content: PageContent,
        map_provider: &dyn MapProvider,
    ) -> ScrollweaveResult<Self> {
        content.validate()?;
        let width = ctl.config().viewport_width;
        let sizes: Vec<Size> = STACK.iter().map(|&(_, h)| Size::new(width, h)).collect();
        let total: f64 = STACK.iter().map(|&(_, h)| h).sum();
        let rects = resolve_child_rects(
            Rect::new(0.0, 0.0, width, total),
            &sizes,
            &BoxLayout::new(LayoutMode::VStack),
        );
        let rect = |name: &str| {
            STACK
                .iter()
                .position(|&(n, _)| n == name)
                .and_then(|i| rects.get(i).copied())
                .unwrap_or_default()
        };

        let slide = Rc::new(Cell::new(Cycle::new(content.hero.slides.len())));
        let sections = vec![
            sections::navigation(ctl, &content, rect("nav")),
            sections::hero(ctl, &content, rect("hero"), Rc::clone(&slide))?,
            sections::partners(ctl, &content, rect("partners"))?,
            sections::features(ctl, &content, rect("features"))?,
            sections::products(ctl, &content, rect("products"))?,
            sections::cta(ctl, rect("cta"))?,
            sections::testimonials(ctl, rect("testimonials"))?,
            sections::faq(ctl, &content, rect("faq")),
            sections::news(ctl, &content, rect("news"))?,
            sections::contact(ctl, rect("contact")),
            sections::footer(ctl, rect("footer")),
            sections::cursor(ctl)?,
        ];

        let map = MapView::resolve(
            map_provider,
            ctl.config().map_api_key.as_deref(),
            &content.contact.address,
        );
        tracing::debug!(sections = sections.len(), map_fallback = map.is_fallback(), "page built");
        Ok(Self {
            testimonial: Cycle::new(content.testimonials.len()),
            faq: Accordion::new(content.faqs.len()),
            form: ContactForm::new(),
            navigator: AnchorNavigator::new(NAV_HEIGHT),
            content,
            sections,
            slide,
            map,
        })
    }

    /// Page copy.
    pub fn content(&self) -> &PageContent {
        &self.content
    }

    /// Sections still mounted, top to bottom.
    pub fn sections(&self) -> &[MountedSection] {
        &self.sections
    }

    /// Mounted section by name.
    pub fn section(&self, name: &str) -> Option<&MountedSection> {
        self.sections.iter().find(|s| s.name == name)
    }

    /// Move the pointer onto (or off) a section root or one of its parts.
    ///
    /// Returns `false` when the section or part does not exist.
    pub fn hover(
        &self,
        ctl: &mut ViewportAnimationController,
        section: &str,
        part: Option<&str>,
        leave: bool,
    ) -> bool {
        let Some(s) = self.section(section) else {
            return false;
        };
        let target = match part {
            Some(role) => match s.first(role) {
                Some(id) => id,
                None => return false,
            },
            None => s.root,
        };
        ctl.pointer(if leave {
            PointerEvent::Leave { target }
        } else {
            PointerEvent::Enter { target }
        });
        true
    }

    /// Follow an in-page link.
    pub fn click(&self, ctl: &mut ViewportAnimationController, href: &str) -> NavOutcome {
        self.navigator.click(ctl, href)
    }

    /// Current hero slide.
    pub fn slide(&self) -> usize {
        self.slide.get().current()
    }

    /// Current testimonial.
    pub fn testimonial(&self) -> usize {
        self.testimonial.current()
    }

    /// Show the next testimonial.
    pub fn next_testimonial(&mut self) -> usize {
        self.testimonial.next()
    }

    /// Show the previous testimonial.
    pub fn prev_testimonial(&mut self) -> usize {
        self.testimonial.prev()
    }

    /// Click FAQ item `index`; returns the open item afterwards.
    pub fn toggle_faq(&mut self, index: usize) -> Option<usize> {
        self.faq.toggle(index)
    }

    /// Open FAQ item.
    pub fn faq_open(&self) -> Option<usize> {
        self.faq.open()
    }

    /// Contact form for filling in fields.
    pub fn form_mut(&mut self) -> &mut ContactForm {
        &mut self.form
    }

    /// Submit the contact form to `handler`.
    pub fn submit_contact(&mut self, handler: &mut dyn SubmitHandler) -> Result<(), FormError> {
        self.form.submit(handler)
    }

    /// Map slot content.
    pub fn map(&self) -> &MapView {
        &self.map
    }

    /// Unmount section `name` and detach its elements; returns the released binding count.
    pub fn unmount(&mut self, ctl: &mut ViewportAnimationController, name: &str) -> usize {
        let Some(i) = self.sections.iter().position(|s| s.name == name) else {
            return 0;
        };
        let section = self.sections.remove(i);
        let released = ctl.unmount(section.instance);
        ctl.document_mut().remove(section.root);
        released
    }

    /// Unmount every section, bottom to top.
    pub fn unmount_all(&mut self, ctl: &mut ViewportAnimationController) -> usize {
        let mut released = 0;
        while let Some(section) = self.sections.pop() {
            released += ctl.unmount(section.instance);
            ctl.document_mut().remove(section.root);
        }
        released
    }
}

/// Outcome of replaying a [`SimulationScript`] against the landing page.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SimulationReport {
    /// Controller events in order.
    pub events: Vec<LoggedEvent>,
    /// Final scroll offset.
    pub scroll_y: f64,
    /// Final hero slide.
    pub slide: usize,
    /// Open FAQ item.
    pub faq_open: Option<usize>,
    /// Accepted contact submissions.
    pub submissions: Vec<ContactPayload>,
    /// Refused submits with their reasons.
    pub rejected: Vec<String>,
    /// Map slot content.
    pub map: MapView,
    /// Sections still mounted.
    pub mounted: Vec<String>,
    /// Resources still held.
    pub resources: ResourceCounts,
}

/// Build the landing page and replay `script` against it.
#[tracing::instrument(skip_all, fields(steps = script.steps.len()))]
pub fn simulate(
    config: StageConfig,
    content: PageContent,
    script: &SimulationScript,
) -> ScrollweaveResult<SimulationReport> {
    script.validate()?;
    let mut ctl = ViewportAnimationController::new(config)?;
    let provider = EmbedMapProvider {
        base_url: MAP_EMBED_URL.to_owned(),
        query: content.contact.address.clone(),
    };
    let mut page = LandingPage::build(&mut ctl, content, &provider)?;
    let mut handler = (LoggingSubmitHandler, RecordingSubmitHandler::default());
    let mut rejected = Vec::new();

    for step in &script.steps {
        match step {
            ScriptStep::Scroll { y } => ctl.scroll_to(*y),
            ScriptStep::Tick { ms } => ctl.tick(*ms),
            ScriptStep::Pointer { event } => ctl.pointer(*event),
            ScriptStep::Hover {
                section,
                part,
                leave,
            } => {
                if !page.hover(&mut ctl, section, part.as_deref(), *leave) {
                    tracing::warn!(%section, ?part, "hover target not found");
                }
            }
            ScriptStep::Click { href } => {
                let outcome = page.click(&mut ctl, href);
                tracing::debug!(?outcome, "link clicked");
            }
            ScriptStep::Faq { index } => {
                page.toggle_faq(*index);
            }
            ScriptStep::Submit {
                name,
                email,
                subject,
                message,
            } => {
                let form = page.form_mut();
                form.set(Field::Name, name.as_str());
                form.set(Field::Email, email.as_str());
                form.set(Field::Subject, subject.as_str());
                form.set(Field::Message, message.as_str());
                if let Err(err) = page.submit_contact(&mut handler) {
                    rejected.push(err.to_string());
                }
            }
            ScriptStep::Unmount { section } => {
                page.unmount(&mut ctl, section);
            }
        }
    }

    Ok(SimulationReport {
        scroll_y: ctl.viewport().scroll_y,
        slide: page.slide(),
        faq_open: page.faq_open(),
        submissions: handler.1.received,
        rejected,
        map: page.map().clone(),
        mounted: page.sections().iter().map(|s| s.name.clone()).collect(),
        resources: ctl.resources(),
        events: ctl.drain_events(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/page/landing.rs"]
mod tests;
