use std::cell::Cell;
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::{
    animation::ease::Ease,
    animation::props::Prop,
    animation::spec::{AnimationSpec, Repeat},
    animation::stagger::{Stagger, StaggerFrom},
    animation::timeline::{Position, Timeline},
    controller::batch::ScrollBatch,
    controller::interaction::{DragSpec, FollowSpec, InteractionKind, TiltSpec},
    controller::registry::Callback,
    controller::viewport::ViewportAnimationController,
    dom::layout::{Align, BoxLayout, Edges, LayoutMode, resolve_child_rects},
    foundation::core::{Millis, Rect, Size, Vec2},
    foundation::error::ScrollweaveResult,
    foundation::ids::{BindingHandle, ElementId, InstanceId},
    page::content::PageContent,
    page::faq::Cycle,
    trigger::condition::{ReplayPolicy, TriggerCondition},
    trigger::observer::IntersectionChange,
};

const BACK_OUT: Ease = Ease::OutBack { overshoot: 1.7 };
const ELASTIC_SETTLE: Ease = Ease::OutElastic {
    amplitude: 1.0,
    period: 0.8,
};

/// A mounted page section: its root, controller instance, bindings and named parts.
#[derive(Clone, Debug, PartialEq)]
pub struct MountedSection {
    /// Section name (`"hero"`, `"products"`, ...).
    pub name: String,
    /// Section root element.
    pub root: ElementId,
    /// Controller instance owning every binding below.
    pub instance: InstanceId,
    /// Bindings made at mount, in order.
    pub bindings: Vec<BindingHandle>,
    parts: BTreeMap<&'static str, Vec<ElementId>>,
}

impl MountedSection {
    /// Elements registered under `role` (`"cards"`, `"track"`, ...).
    pub fn part(&self, role: &str) -> &[ElementId] {
        self.parts.get(role).map(Vec::as_slice).unwrap_or(&[])
    }

    /// First element registered under `role`.
    pub fn first(&self, role: &str) -> Option<ElementId> {
        self.part(role).first().copied()
    }
}

struct SectionBuilder<'a> {
    ctl: &'a mut ViewportAnimationController,
    rect: Rect,
    section: MountedSection,
}

impl<'a> SectionBuilder<'a> {
    fn open(
        ctl: &'a mut ViewportAnimationController,
        name: &str,
        anchor: Option<&str>,
        rect: Rect,
    ) -> Self {
        let doc = ctl.document_mut();
        let root = doc.create("section", rect);
        if let Some(anchor) = anchor {
            doc.set_anchor(root, anchor);
        }
        let body = doc.root();
        doc.append(body, root);
        let instance = ctl.mount(name, root);
        Self {
            ctl,
            rect,
            section: MountedSection {
                name: name.to_owned(),
                root,
                instance,
                bindings: Vec::new(),
                parts: BTreeMap::new(),
            },
        }
    }

    fn root(&self) -> ElementId {
        self.section.root
    }

    fn element(&mut self, parent: ElementId, tag: &str, rect: Rect) -> ElementId {
        let doc = self.ctl.document_mut();
        let id = doc.create(tag, rect);
        doc.append(parent, id);
        id
    }

    fn lay_out(
        &mut self,
        parent: ElementId,
        tag: &str,
        area: Rect,
        sizes: &[Size],
        layout: &BoxLayout,
    ) -> Vec<ElementId> {
        resolve_child_rects(area, sizes, layout)
            .into_iter()
            .map(|r| self.element(parent, tag, r))
            .collect()
    }

    /// Heading band of `height` starting `top` pixels into the section.
    fn band(&self, top: f64, height: f64) -> Rect {
        Rect::new(
            self.rect.x0,
            self.rect.y0 + top,
            self.rect.x1,
            self.rect.y0 + top + height,
        )
    }

    fn part(&mut self, role: &'static str, ids: &[ElementId]) {
        self.section
            .parts
            .entry(role)
            .or_default()
            .extend_from_slice(ids);
    }

    fn keep(&mut self, handle: Option<BindingHandle>) -> Option<BindingHandle> {
        self.section.bindings.extend(handle);
        handle
    }

    fn entrance(
        &mut self,
        region: ElementId,
        timeline: &Timeline,
        trigger: TriggerCondition,
    ) -> ScrollweaveResult<Option<BindingHandle>> {
        let h = self
            .ctl
            .bind_entrance(self.section.instance, region, timeline, trigger)?;
        Ok(self.keep(h))
    }

    fn interaction(
        &mut self,
        targets: &[ElementId],
        kind: InteractionKind,
    ) -> ScrollweaveResult<Option<BindingHandle>> {
        let h = self
            .ctl
            .bind_interaction(self.section.instance, targets, kind)?;
        Ok(self.keep(h))
    }

    fn batch(
        &mut self,
        targets: &[ElementId],
        batch: ScrollBatch,
    ) -> ScrollweaveResult<Option<BindingHandle>> {
        let h = self
            .ctl
            .bind_batch(self.section.instance, targets, batch)?;
        Ok(self.keep(h))
    }

    fn looping(
        &mut self,
        targets: &[ElementId],
        spec: AnimationSpec,
    ) -> ScrollweaveResult<Option<BindingHandle>> {
        let h = self.ctl.bind_loop(self.section.instance, targets, spec)?;
        Ok(self.keep(h))
    }

    fn interval(&mut self, period: Millis, callback: Callback) -> ScrollweaveResult<()> {
        let h = self
            .ctl
            .bind_interval(self.section.instance, period, callback)?;
        self.keep(h);
        Ok(())
    }

    fn finish(self) -> MountedSection {
        self.section
    }
}

fn centered(area: Rect, size: Size) -> Rect {
    resolve_child_rects(area, &[size], &BoxLayout::new(LayoutMode::Center))
        .pop()
        .unwrap_or(area)
}

fn hover_lift(lift: f64, scale: f64, rotation: f64) -> InteractionKind {
    InteractionKind::Hover {
        enter: AnimationSpec::to("hover-in", Millis(300))
            .set(Prop::Y, lift)
            .set(Prop::Scale, scale)
            .set(Prop::Rotation, rotation)
            .ease(Ease::OutCubic),
        leave: AnimationSpec::to("hover-out", Millis(300))
            .set(Prop::Y, 0.0)
            .set(Prop::Scale, 1.0)
            .set(Prop::Rotation, 0.0)
            .ease(Ease::InOutCubic),
    }
}

fn replay_on_reentry(start: &str) -> ScrollweaveResult<TriggerCondition> {
    TriggerCondition::scroll(
        start,
        ReplayPolicy::from_toggle_actions("play none none reverse")?,
    )
}

pub(crate) fn navigation(
    ctl: &mut ViewportAnimationController,
    content: &PageContent,
    rect: Rect,
) -> MountedSection {
    let mut b = SectionBuilder::open(ctl, "nav", None, rect);
    let root = b.root();
    let sizes = vec![Size::new(120.0, 40.0); content.nav.len()];
    let layout = BoxLayout::new(LayoutMode::HStack)
        .gap(32.0)
        .align(Align::End, Align::Center);
    let links = b.lay_out(root, "link", rect, &sizes, &layout);
    b.part("links", &links);
    b.finish()
}

pub(crate) fn hero(
    ctl: &mut ViewportAnimationController,
    content: &PageContent,
    rect: Rect,
    slide: Rc<Cell<Cycle>>,
) -> ScrollweaveResult<MountedSection> {
    let period = ctl.config().slideshow_interval;
    let mut b = SectionBuilder::open(ctl, "hero", Some("hero"), rect);
    let root = b.root();
    let slides: Vec<ElementId> = (0..content.hero.slides.len())
        .map(|_| b.element(root, "img", rect))
        .collect();
    let copy = b.element(root, "div", centered(rect, Size::new(800.0, 360.0)));
    let circle = b.element(
        copy,
        "div",
        Rect::from_origin_size((rect.x1 - 192.0, rect.center().y - 192.0), (384.0, 384.0)),
    );
    b.part("slides", &slides);
    b.part("copy", &[copy]);
    b.part("circle", &[circle]);

    let intro = Timeline::new().then(
        AnimationSpec::from("hero-intro", Millis(1000))
            .set(Prop::Opacity, 0.0)
            .set(Prop::Y, 100.0)
            .ease(Ease::OutQuart),
        vec![copy],
    );
    b.entrance(root, &intro, TriggerCondition::immediate())?;
    b.looping(
        &[circle],
        AnimationSpec::to("hero-orbit", Millis(20_000))
            .set(Prop::Rotation, 360.0)
            .ease(Ease::Linear)
            .repeat(Repeat::Infinite),
    )?;
    b.interval(
        period,
        Box::new(move || {
            let mut cycle = slide.get();
            cycle.next();
            slide.set(cycle);
        }),
    )?;
    Ok(b.finish())
}

pub(crate) fn partners(
    ctl: &mut ViewportAnimationController,
    content: &PageContent,
    rect: Rect,
) -> ScrollweaveResult<MountedSection> {
    let mut b = SectionBuilder::open(ctl, "partners", None, rect);
    let root = b.root();
    let heading = b.element(root, "h2", centered(b.band(128.0, 64.0), Size::new(640.0, 64.0)));
    let grid = b.element(root, "div", b.band(256.0, 176.0));
    let sizes = vec![Size::new(240.0, 96.0); content.partners.len()];
    let layout = BoxLayout::new(LayoutMode::Grid)
        .columns(4)
        .gap(48.0)
        .padding(Edges::all(32.0));
    let grid_rect = b.band(256.0, 176.0);
    let items = b.lay_out(grid, "partner", grid_rect, &sizes, &layout);
    b.part("heading", &[heading]);
    b.part("items", &items);

    let heading_in = Timeline::new().then(
        AnimationSpec::from("partners-heading", Millis(1000))
            .set(Prop::Opacity, 0.0)
            .set(Prop::Scale, 0.8)
            .ease(BACK_OUT),
        vec![heading],
    );
    b.entrance(
        heading,
        &heading_in,
        TriggerCondition::scroll("top center+=200", ReplayPolicy::PlayOnce)?,
    )?;
    let items_in = Timeline::new().then(
        AnimationSpec::from("partners-items", Millis(1000))
            .set(Prop::Opacity, 0.0)
            .set(Prop::Y, 50.0)
            .set(Prop::Rotation, -15.0)
            .stagger(Stagger::each(Millis(200)))
            .ease(Ease::OutQuart),
        items.clone(),
    );
    b.entrance(
        grid,
        &items_in,
        TriggerCondition::scroll("top center+=100", ReplayPolicy::PlayOnce)?,
    )?;
    b.interaction(
        &items,
        InteractionKind::Hover {
            enter: AnimationSpec::to("partner-in", Millis(300))
                .set(Prop::Scale, 1.1)
                .set(Prop::Rotation, 5.0)
                .ease(Ease::OutCubic),
            leave: AnimationSpec::to("partner-out", Millis(300))
                .set(Prop::Scale, 1.0)
                .set(Prop::Rotation, 0.0)
                .ease(Ease::InCubic),
        },
    )?;
    Ok(b.finish())
}

pub(crate) fn features(
    ctl: &mut ViewportAnimationController,
    content: &PageContent,
    rect: Rect,
) -> ScrollweaveResult<MountedSection> {
    let mut b = SectionBuilder::open(ctl, "features", Some("features"), rect);
    let root = b.root();
    let title = b.element(root, "h2", centered(b.band(96.0, 64.0), Size::new(720.0, 64.0)));
    let underline = b.element(root, "div", centered(b.band(168.0, 24.0), Size::new(192.0, 24.0)));
    let wave_rect = centered(b.band(168.0, 24.0), Size::new(200.0, 24.0));
    let wave = b.element(underline, "path", wave_rect);
    let grid_rect = b.band(272.0, rect.height() - 368.0);
    let grid = b.element(root, "div", grid_rect);
    let sizes = vec![Size::new(480.0, 220.0); content.features.len()];
    let layout = BoxLayout::new(LayoutMode::Grid)
        .columns(2)
        .gap(32.0)
        .padding(Edges {
            left: 144.0,
            right: 144.0,
            top: 0.0,
            bottom: 0.0,
        });
    let cards = b.lay_out(grid, "card", grid_rect, &sizes, &layout);
    let icons: Vec<ElementId> = cards
        .iter()
        .map(|&card| {
            let at = b.ctl.document().rect(card).unwrap_or(grid_rect).origin();
            b.element(
                card,
                "icon",
                Rect::from_origin_size((at.x + 32.0, at.y + 32.0), (64.0, 64.0)),
            )
        })
        .collect();
    b.part("title", &[title]);
    b.part("underline", &[underline]);
    b.part("wave", &[wave]);
    b.part("cards", &cards);
    b.part("icons", &icons);

    let intro = Timeline::new()
        .with_default_ease(Ease::OutQuart)
        .then(
            AnimationSpec::from("features-section", Millis(1000))
                .set(Prop::Opacity, 0.0)
                .set(Prop::Y, 30.0)
                .ease(Ease::OutCubic),
            vec![root],
        )
        .add(
            AnimationSpec::from("features-title", Millis(1200))
                .set(Prop::Opacity, 0.0)
                .set(Prop::Y, 50.0),
            vec![title],
            Position::Relative(-500),
        )
        .add(
            AnimationSpec::from("features-underline", Millis(800))
                .set(Prop::Opacity, 0.0)
                .set(Prop::Scale, 0.5)
                .ease(BACK_OUT),
            vec![underline],
            Position::Relative(-800),
        )
        .add(
            AnimationSpec::from("features-wave", Millis(1200))
                .set(Prop::StrokeDashOffset, 300.0)
                .ease(Ease::InOutQuart),
            vec![wave],
            Position::Relative(-400),
        )
        .add(
            AnimationSpec::from("features-cards", Millis(1000))
                .set(Prop::Opacity, 0.0)
                .set(Prop::Y, 100.0)
                .set(Prop::Scale, 0.8)
                .stagger(Stagger::each(Millis(100)).from(StaggerFrom::Start)),
            cards.clone(),
            Position::Relative(-800),
        );
    b.entrance(root, &intro, TriggerCondition::immediate())?;
    b.looping(
        &[underline],
        AnimationSpec::to("features-float", Millis(1500))
            .set(Prop::Y, 3.0)
            .ease(Ease::InOutSine)
            .repeat(Repeat::Infinite)
            .yoyo(true),
    )?;
    b.batch(&cards, card_replay())?;
    b.interaction(&cards, hover_lift(-10.0, 1.0, 0.0))?;
    b.interaction(
        &cards,
        InteractionKind::HoverCompanion {
            pairs: cards.iter().copied().zip(icons.iter().copied()).collect(),
            enter: AnimationSpec::to("feature-icon-in", Millis(400))
                .set(Prop::Y, -5.0)
                .set(Prop::Scale, 1.1)
                .ease(BACK_OUT),
            leave: AnimationSpec::to("feature-icon-out", Millis(300))
                .set(Prop::Y, 0.0)
                .set(Prop::Scale, 1.0)
                .ease(Ease::InOutCubic),
        },
    )?;
    Ok(b.finish())
}

/// Feature cards fade back in from whichever side they re-enter, and out toward the side
/// they leave through.
fn card_replay() -> ScrollBatch {
    let shown = |name: &str, duration: u64, each: u64| {
        AnimationSpec::to(name, Millis(duration))
            .set(Prop::Opacity, 1.0)
            .set(Prop::Y, 0.0)
            .set(Prop::Scale, 1.0)
            .stagger(Stagger::each(Millis(each)))
    };
    let hidden = |name: &str, y: f64| {
        AnimationSpec::to(name, Millis(800))
            .set(Prop::Opacity, 0.0)
            .set(Prop::Y, y)
            .set(Prop::Scale, 0.95)
            .stagger(Stagger::each(Millis(100)))
    };
    ScrollBatch::new()
        .on(
            IntersectionChange::Enter,
            shown("feature-cards-enter", 1000, 150).ease(Ease::OutQuart),
        )
        .on(IntersectionChange::Leave, hidden("feature-cards-leave", 50.0))
        .on(
            IntersectionChange::EnterBack,
            shown("feature-cards-enter-back", 800, 100),
        )
        .on(
            IntersectionChange::LeaveBack,
            hidden("feature-cards-leave-back", -50.0),
        )
}

pub(crate) fn products(
    ctl: &mut ViewportAnimationController,
    content: &PageContent,
    rect: Rect,
) -> ScrollweaveResult<MountedSection> {
    const CARD: Size = Size::new(320.0, 440.0);
    const GAP: f64 = 32.0;

    let mut b = SectionBuilder::open(ctl, "products", Some("devices"), rect);
    let root = b.root();
    let title = b.element(root, "h2", centered(b.band(96.0, 64.0), Size::new(720.0, 64.0)));
    let underline = b.element(root, "div", centered(b.band(168.0, 8.0), Size::new(128.0, 8.0)));
    let carousel_rect = b.band(240.0, CARD.height + 80.0);
    let carousel = b.element(root, "div", carousel_rect);
    let n = content.products.len();
    let track_width = n as f64 * CARD.width + n.saturating_sub(1) as f64 * GAP;
    let track_rect = Rect::from_origin_size(
        (carousel_rect.x0, carousel_rect.y0 + 40.0),
        (track_width, CARD.height),
    );
    let track = b.element(carousel, "div", track_rect);
    let cards = b.lay_out(
        track,
        "card",
        track_rect,
        &vec![CARD; n],
        &BoxLayout::new(LayoutMode::HStack).gap(GAP),
    );
    b.part("title", &[title]);
    b.part("underline", &[underline]);
    b.part("carousel", &[carousel]);
    b.part("track", &[track]);
    b.part("cards", &cards);

    let header = Timeline::new()
        .then(
            AnimationSpec::from("products-title", Millis(1000))
                .set(Prop::Opacity, 0.0)
                .set(Prop::Y, 50.0)
                .ease(Ease::OutQuart),
            vec![title],
        )
        .add(
            AnimationSpec::from("products-underline", Millis(800))
                .set(Prop::ScaleX, 0.0)
                .ease(Ease::InOutQuart),
            vec![underline],
            Position::Relative(-500),
        );
    b.entrance(title, &header, replay_on_reentry("top bottom-=100")?)?;

    let deal = Timeline::new().then(
        AnimationSpec::from("products-cards", Millis(1200))
            .set(Prop::Opacity, 0.0)
            .set(Prop::Scale, 0.8)
            .set(Prop::RotationY, 35.0)
            .stagger(Stagger::each(Millis(80)).from(StaggerFrom::Center))
            .ease(Ease::OutQuart),
        cards.clone(),
    );
    b.entrance(root, &deal, TriggerCondition::immediate())?;

    let min_x = (carousel_rect.width() - track_width).min(0.0);
    let auto_rotate = b.looping(
        &[track],
        AnimationSpec::to("products-auto-rotate", Millis(30_000))
            .set(Prop::X, min_x)
            .ease(Ease::Linear)
            .repeat(Repeat::Infinite),
    )?;
    b.interaction(
        &[track],
        InteractionKind::Drag(DragSpec {
            min_x,
            max_x: 0.0,
            edge_resistance: 0.65,
            inertia: true,
            followers: cards.clone(),
            follower_tilt: 0.02,
            follower_duration: Millis(500),
            release: AnimationSpec::to("products-release", Millis(800))
                .set(Prop::RotationY, 0.0)
                .ease(ELASTIC_SETTLE),
            pauses: auto_rotate,
        }),
    )?;
    if let Some(target) = auto_rotate {
        b.interaction(&[carousel], InteractionKind::PauseLoop { target })?;
    }
    b.interaction(
        &cards,
        InteractionKind::Hover {
            enter: AnimationSpec::to("product-in", Millis(300))
                .set(Prop::Y, -10.0)
                .set(Prop::Scale, 1.05)
                .ease(Ease::OutCubic),
            leave: AnimationSpec::to("product-out", Millis(300))
                .set(Prop::Y, 0.0)
                .set(Prop::Scale, 1.0)
                .ease(Ease::InOutCubic),
        },
    )?;
    b.interaction(
        &cards,
        InteractionKind::Hover {
            enter: AnimationSpec::to("product-turn-in", Millis(400))
                .set(Prop::RotationY, 5.0)
                .ease(Ease::OutCubic),
            leave: AnimationSpec::to("product-turn-out", Millis(400))
                .set(Prop::RotationY, 0.0)
                .ease(Ease::InOutCubic),
        },
    )?;
    b.interaction(
        &cards,
        InteractionKind::Tilt(TiltSpec {
            max_deg: 3.0,
            duration: Millis(400),
            ease: Ease::OutCubic,
            settle: AnimationSpec::to("product-settle", Millis(600))
                .set(Prop::RotationX, 0.0)
                .set(Prop::RotationY, 0.0)
                .ease(ELASTIC_SETTLE),
        }),
    )?;
    Ok(b.finish())
}

/// Block that fades up on entry and fades back out when scrolled past upward.
fn fade_up_block(
    ctl: &mut ViewportAnimationController,
    name: &str,
    anchor: Option<&str>,
    rect: Rect,
    block: Size,
) -> ScrollweaveResult<MountedSection> {
    let mut b = SectionBuilder::open(ctl, name, anchor, rect);
    let root = b.root();
    let inner = b.element(root, "div", centered(rect, block));
    b.part("block", &[inner]);
    let tl = Timeline::new().then(
        AnimationSpec::from(format!("{name}-fade-up"), Millis(1000))
            .set(Prop::Opacity, 0.0)
            .set(Prop::Y, 50.0)
            .ease(Ease::OutQuart),
        vec![inner],
    );
    b.entrance(inner, &tl, replay_on_reentry("top center+=100")?)?;
    Ok(b.finish())
}

pub(crate) fn cta(
    ctl: &mut ViewportAnimationController,
    rect: Rect,
) -> ScrollweaveResult<MountedSection> {
    fade_up_block(ctl, "cta", None, rect, Size::new(960.0, 240.0))
}

pub(crate) fn testimonials(
    ctl: &mut ViewportAnimationController,
    rect: Rect,
) -> ScrollweaveResult<MountedSection> {
    fade_up_block(
        ctl,
        "testimonials",
        Some("testimonials"),
        rect,
        Size::new(896.0, 360.0),
    )
}

pub(crate) fn faq(
    ctl: &mut ViewportAnimationController,
    content: &PageContent,
    rect: Rect,
) -> MountedSection {
    let mut b = SectionBuilder::open(ctl, "faq", Some("faq"), rect);
    let root = b.root();
    let list = b.band(200.0, rect.height() - 280.0);
    let sizes = vec![Size::new(768.0, 72.0); content.faqs.len()];
    let layout = BoxLayout::new(LayoutMode::VStack)
        .gap(16.0)
        .align(Align::Center, Align::Start);
    let items = b.lay_out(root, "details", list, &sizes, &layout);
    b.part("items", &items);
    b.finish()
}

pub(crate) fn news(
    ctl: &mut ViewportAnimationController,
    content: &PageContent,
    rect: Rect,
) -> ScrollweaveResult<MountedSection> {
    let mut b = SectionBuilder::open(ctl, "news", Some("news"), rect);
    let root = b.root();
    let grid_rect = b.band(240.0, 480.0);
    let grid = b.element(root, "div", grid_rect);
    let sizes = vec![Size::new(384.0, 440.0); content.news.len()];
    let layout = BoxLayout::new(LayoutMode::HStack)
        .gap(32.0)
        .align(Align::Center, Align::Start);
    let cards = b.lay_out(grid, "article", grid_rect, &sizes, &layout);
    b.part("cards", &cards);
    let tl = Timeline::new().then(
        AnimationSpec::from("news-cards", Millis(800))
            .set(Prop::Opacity, 0.0)
            .set(Prop::Y, 50.0)
            .stagger(Stagger::each(Millis(200))),
        cards.clone(),
    );
    b.entrance(
        grid,
        &tl,
        TriggerCondition::scroll("top center+=100", ReplayPolicy::PlayOnce)?,
    )?;
    Ok(b.finish())
}

pub(crate) fn contact(ctl: &mut ViewportAnimationController, rect: Rect) -> MountedSection {
    let mut b = SectionBuilder::open(ctl, "contact", Some("contact"), rect);
    let root = b.root();
    let body = b.band(200.0, rect.height() - 280.0);
    let columns = b.lay_out(
        root,
        "div",
        body,
        &[Size::new(560.0, 560.0), Size::new(560.0, 560.0)],
        &BoxLayout::new(LayoutMode::HStack)
            .gap(48.0)
            .align(Align::Center, Align::Start),
    );
    if let &[info, form] = columns.as_slice() {
        let info_rect = b.ctl.document().get(info).map_or(body, |e| e.rect);
        let map = b.element(
            info,
            "map",
            Rect::new(info_rect.x0, info_rect.y1 - 240.0, info_rect.x1, info_rect.y1),
        );
        b.part("info", &[info]);
        b.part("form", &[form]);
        b.part("map", &[map]);
    }
    b.finish()
}

pub(crate) fn footer(ctl: &mut ViewportAnimationController, rect: Rect) -> MountedSection {
    SectionBuilder::open(ctl, "footer", None, rect).finish()
}

/// Ring and dot chasing the pointer at different speeds.
pub(crate) fn cursor(ctl: &mut ViewportAnimationController) -> ScrollweaveResult<MountedSection> {
    let ring_rect = Rect::from_origin_size((0.0, 0.0), (32.0, 32.0));
    let mut b = SectionBuilder::open(ctl, "cursor", None, ring_rect);
    let ring = b.root();
    let dot = b.element(ring, "div", Rect::from_origin_size((0.0, 0.0), (8.0, 8.0)));
    b.part("ring", &[ring]);
    b.part("dot", &[dot]);
    b.interaction(
        &[ring],
        InteractionKind::Follow(FollowSpec {
            duration: Millis(800),
            ease: Ease::OutCubic,
            offset: Vec2::new(-16.0, -16.0),
        }),
    )?;
    b.interaction(
        &[dot],
        InteractionKind::Follow(FollowSpec {
            duration: Millis(100),
            ease: Ease::Linear,
            offset: Vec2::new(-4.0, -4.0),
        }),
    )?;
    Ok(b.finish())
}

#[cfg(test)]
#[path = "../../tests/unit/page/sections.rs"]
mod tests;
