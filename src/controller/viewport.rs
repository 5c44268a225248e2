use std::collections::BTreeMap;

use crate::{
    animation::ease::Ease,
    animation::spec::AnimationSpec,
    animation::timeline::Timeline,
    config::StageConfig,
    controller::batch::{BatchBinding, ScrollBatch},
    controller::events::{ControllerEvent, EventLog, LoggedEvent},
    controller::interaction::{
        InteractionKind, InteractionRuntime, LoopControl, PointerEvent, Stage,
    },
    controller::playback::{PlayerEvent, TimelinePlayer},
    controller::registry::{
        Callback, ControllerInstance, EntranceBinding, IntervalTimer, Registration,
        ResourceCounts,
    },
    controller::state::{Command, EntranceState, Signal, step},
    controller::tweens::TweenSet,
    dom::document::{Document, Viewport},
    foundation::core::{Millis, Size},
    foundation::error::{ScrollweaveError, ScrollweaveResult},
    foundation::ids::{BindingHandle, ElementId, InstanceId},
    trigger::condition::TriggerCondition,
    trigger::observer::{IntersectionChange, IntersectionObserver},
};

/// Upper bound on the interval periods one tick replays after a long stall.
const MAX_TIMER_CATCH_UP: u64 = 16;

impl From<PlayerEvent> for Signal {
    fn from(value: PlayerEvent) -> Self {
        match value {
            PlayerEvent::Completed => Self::Completed,
            PlayerEvent::Reversed => Self::Reversed,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct ScrollTween {
    from: f64,
    to: f64,
    start: Millis,
    duration: Millis,
    ease: Ease,
}

/// Binds declarative animations to scroll position and pointer input, and tears them down
/// per section.
///
/// One controller serves the whole page. Sections call [`mount`](Self::mount) to get an
/// instance, bind through it, and call [`unmount`](Self::unmount) to release everything
/// synchronously. The host drives time with [`tick`](Self::tick).
pub struct ViewportAnimationController {
    config: StageConfig,
    doc: Document,
    viewport: Viewport,
    observer: IntersectionObserver,
    tweens: TweenSet,
    instances: BTreeMap<InstanceId, ControllerInstance>,
    scroll: Option<ScrollTween>,
    now: Millis,
    next_instance: u32,
    next_binding: u32,
    log: EventLog,
}

impl ViewportAnimationController {
    /// Create a controller over an empty document sized to the viewport.
    pub fn new(config: StageConfig) -> ScrollweaveResult<Self> {
        config.validate()?;
        crate::init();
        let doc = Document::new(Size::new(config.viewport_width, config.viewport_height));
        let viewport = Viewport::new(config.viewport_width, config.viewport_height);
        Ok(Self {
            config,
            doc,
            viewport,
            observer: IntersectionObserver::default(),
            tweens: TweenSet::default(),
            instances: BTreeMap::new(),
            scroll: None,
            now: Millis::ZERO,
            next_instance: 0,
            next_binding: 0,
            log: EventLog::default(),
        })
    }

    /// Stage settings.
    pub fn config(&self) -> &StageConfig {
        &self.config
    }

    /// The page tree.
    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// Mutable page tree, for building and removing elements.
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    /// Current viewport.
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Stage time.
    pub fn now(&self) -> Millis {
        self.now
    }

    /// Everything logged so far.
    pub fn events(&self) -> &[LoggedEvent] {
        self.log.as_slice()
    }

    /// Take the log, leaving it empty.
    pub fn drain_events(&mut self) -> Vec<LoggedEvent> {
        self.log.drain()
    }

    /// Create the binding scope for a section rooted at `root`.
    #[tracing::instrument(skip(self, name))]
    pub fn mount(&mut self, name: impl Into<String>, root: ElementId) -> InstanceId {
        let instance = InstanceId(self.next_instance);
        self.next_instance += 1;
        let name = name.into();
        self.log.push(
            self.now,
            ControllerEvent::Mounted {
                instance,
                name: name.clone(),
                root,
            },
        );
        self.instances
            .insert(instance, ControllerInstance::new(name, root));
        instance
    }

    /// Release every binding of `instance` and forget it; returns how many were released.
    ///
    /// Nothing owned by the instance runs after this returns.
    #[tracing::instrument(skip(self))]
    pub fn unmount(&mut self, instance: InstanceId) -> usize {
        let Some(inst) = self.instances.remove(&instance) else {
            return 0;
        };
        let released = inst.registrations.len();
        for handle in inst.registrations.into_keys() {
            self.teardown(handle);
        }
        self.log
            .push(self.now, ControllerEvent::Unmounted { instance, released });
        released
    }

    /// Mounted instances with their section names and roots.
    pub fn instances(&self) -> impl Iterator<Item = (InstanceId, &str, ElementId)> + '_ {
        self.instances
            .iter()
            .map(|(&id, inst)| (id, inst.name.as_str(), inst.root))
    }

    /// Instance mounted under `name`, if any.
    pub fn instance_named(&self, name: &str) -> Option<InstanceId> {
        self.instances
            .iter()
            .find(|(_, inst)| inst.name == name)
            .map(|(&id, _)| id)
    }

    fn allocate(&mut self, instance: InstanceId) -> BindingHandle {
        let handle = BindingHandle {
            instance,
            id: self.next_binding,
        };
        self.next_binding += 1;
        handle
    }

    fn skip(&mut self, instance: InstanceId, reason: impl Into<String>) {
        let reason = reason.into();
        tracing::debug!(?instance, %reason, "bind skipped");
        self.log
            .push(self.now, ControllerEvent::Skipped { instance, reason });
    }

    fn register(&mut self, handle: BindingHandle, reg: Registration) -> Option<BindingHandle> {
        let kind = reg.kind();
        let inst = self.instances.get_mut(&handle.instance)?;
        inst.registrations.insert(handle, reg);
        self.log
            .push(self.now, ControllerEvent::Bound { handle, kind });
        Some(handle)
    }

    /// Play `timeline` when `root` intersects the viewport per `trigger`.
    ///
    /// `From` targets are rendered at their starting values immediately. Returns `Ok(None)`
    /// when the instance is unknown or `root` is not attached.
    #[tracing::instrument(skip(self, timeline))]
    pub fn bind_entrance(
        &mut self,
        instance: InstanceId,
        root: ElementId,
        timeline: &Timeline,
        trigger: TriggerCondition,
    ) -> ScrollweaveResult<Option<BindingHandle>> {
        timeline.validate()?;
        if !self.instances.contains_key(&instance) {
            self.skip(instance, "unknown instance");
            return Ok(None);
        }
        if !self.doc.is_attached(root) {
            self.skip(instance, format!("entrance root {} is not attached", root.0));
            return Ok(None);
        }
        let handle = self.allocate(instance);
        let mut player = TimelinePlayer::new(timeline, self.config.default_ease);
        player.prime(&mut self.doc);
        let binding = EntranceBinding {
            policy: trigger.policy,
            state: EntranceState::Unarmed,
            player,
            on_complete: Vec::new(),
        };
        self.register(handle, Registration::Entrance(binding));
        self.observer.observe(handle, root, trigger);
        self.dispatch_intersections();
        Ok(Some(handle))
    }

    /// Run `callback` every time the entrance `handle` completes.
    ///
    /// Returns `false` when `handle` is not a live entrance binding.
    pub fn on_complete(&mut self, handle: BindingHandle, callback: Callback) -> bool {
        match self.registration_mut(handle) {
            Some(Registration::Entrance(binding)) => {
                binding.on_complete.push(callback);
                true
            }
            _ => false,
        }
    }

    /// Bind a pointer-driven animation to `targets`; detached targets are dropped.
    #[tracing::instrument(skip(self, kind))]
    pub fn bind_interaction(
        &mut self,
        instance: InstanceId,
        targets: &[ElementId],
        kind: InteractionKind,
    ) -> ScrollweaveResult<Option<BindingHandle>> {
        kind.validate()?;
        if !self.instances.contains_key(&instance) {
            self.skip(instance, "unknown instance");
            return Ok(None);
        }
        let live: Vec<ElementId> = targets
            .iter()
            .copied()
            .filter(|&t| self.doc.is_attached(t))
            .collect();
        if live.is_empty() {
            self.skip(instance, "no attached interaction targets");
            return Ok(None);
        }
        let handle = self.allocate(instance);
        Ok(self.register(
            handle,
            Registration::Interaction(InteractionRuntime::new(kind, live)),
        ))
    }

    /// Start an endless animation on `targets`.
    #[tracing::instrument(skip(self, spec))]
    pub fn bind_loop(
        &mut self,
        instance: InstanceId,
        targets: &[ElementId],
        spec: AnimationSpec,
    ) -> ScrollweaveResult<Option<BindingHandle>> {
        spec.validate()?;
        if !self.instances.contains_key(&instance) {
            self.skip(instance, "unknown instance");
            return Ok(None);
        }
        let live: Vec<ElementId> = targets
            .iter()
            .copied()
            .filter(|&t| self.doc.is_attached(t))
            .collect();
        if live.is_empty() {
            self.skip(instance, "no attached loop targets");
            return Ok(None);
        }
        let handle = self.allocate(instance);
        let mut player = TimelinePlayer::looping(spec, live, self.config.default_ease);
        player.prime(&mut self.doc);
        player.play();
        Ok(self.register(handle, Registration::Loop(player)))
    }

    /// Run `callback` every `period`, first one `period` from now.
    #[tracing::instrument(skip(self, callback))]
    pub fn bind_interval(
        &mut self,
        instance: InstanceId,
        period: Millis,
        callback: Callback,
    ) -> ScrollweaveResult<Option<BindingHandle>> {
        if period == Millis::ZERO {
            return Err(ScrollweaveError::validation("interval period must be > 0"));
        }
        if !self.instances.contains_key(&instance) {
            self.skip(instance, "unknown instance");
            return Ok(None);
        }
        let handle = self.allocate(instance);
        let timer = IntervalTimer {
            period,
            next_due: self.now.0.checked_add(period.0).map(Millis),
            callback,
        };
        Ok(self.register(handle, Registration::Timer(timer)))
    }

    /// Animate `targets` as they cross the batch's trigger points.
    ///
    /// Every target is observed on its own; targets crossing in the same direction during
    /// one update share a single staggered tween.
    #[tracing::instrument(skip(self, batch))]
    pub fn bind_batch(
        &mut self,
        instance: InstanceId,
        targets: &[ElementId],
        batch: ScrollBatch,
    ) -> ScrollweaveResult<Option<BindingHandle>> {
        batch.validate()?;
        if !self.instances.contains_key(&instance) {
            self.skip(instance, "unknown instance");
            return Ok(None);
        }
        let live: Vec<ElementId> = targets
            .iter()
            .copied()
            .filter(|&t| self.doc.is_attached(t))
            .collect();
        if live.is_empty() {
            self.skip(instance, "no attached batch targets");
            return Ok(None);
        }
        let handle = self.allocate(instance);
        let condition = batch.condition();
        for &target in &live {
            self.observer.observe(handle, target, condition);
        }
        self.register(
            handle,
            Registration::Batch(BatchBinding {
                batch,
                targets: live,
            }),
        );
        self.dispatch_intersections();
        Ok(Some(handle))
    }

    /// Pause a loop; returns `false` when `handle` is not a live loop.
    pub fn pause_loop(&mut self, handle: BindingHandle) -> bool {
        self.control_loop(LoopControl::Pause(handle))
    }

    /// Resume a paused loop; returns `false` when `handle` is not a live loop.
    pub fn resume_loop(&mut self, handle: BindingHandle) -> bool {
        self.control_loop(LoopControl::Resume(handle))
    }

    fn control_loop(&mut self, control: LoopControl) -> bool {
        let (handle, play) = match control {
            LoopControl::Pause(h) => (h, false),
            LoopControl::Resume(h) => (h, true),
        };
        let Some(Registration::Loop(player)) = self.registration_mut(handle) else {
            return false;
        };
        if play {
            player.play();
            self.log
                .push(self.now, ControllerEvent::LoopResumed { handle });
        } else {
            player.pause();
            self.log.push(self.now, ControllerEvent::LoopPaused { handle });
        }
        true
    }

    /// Cancel everything owned by `handle`. Visual state stays as last committed.
    ///
    /// Returns `false` when the handle was already released.
    #[tracing::instrument(skip(self))]
    pub fn release(&mut self, handle: BindingHandle) -> bool {
        let removed = self
            .instances
            .get_mut(&handle.instance)
            .and_then(|inst| inst.registrations.remove(&handle));
        if removed.is_none() {
            return false;
        }
        self.teardown(handle);
        true
    }

    fn teardown(&mut self, handle: BindingHandle) {
        self.observer.unobserve(handle);
        self.tweens.cancel_owner(handle);
        self.log.push(self.now, ControllerEvent::Released { handle });
    }

    fn registration_mut(&mut self, handle: BindingHandle) -> Option<&mut Registration> {
        self.instances
            .get_mut(&handle.instance)?
            .registrations
            .get_mut(&handle)
    }

    fn entrance(&self, handle: BindingHandle) -> Option<&EntranceBinding> {
        match self
            .instances
            .get(&handle.instance)?
            .registrations
            .get(&handle)?
        {
            Registration::Entrance(b) => Some(b),
            _ => None,
        }
    }

    /// State of an entrance binding.
    pub fn entrance_state(&self, handle: BindingHandle) -> Option<EntranceState> {
        self.entrance(handle).map(|b| b.state)
    }

    /// Playhead of an entrance binding.
    pub fn entrance_position(&self, handle: BindingHandle) -> Option<Millis> {
        self.entrance(handle).map(|b| b.player.position())
    }

    /// Resources held across all instances.
    pub fn resources(&self) -> ResourceCounts {
        let mut total = ResourceCounts::default();
        for &id in self.instances.keys() {
            total.add(self.instance_resources(id));
        }
        total
    }

    /// Resources held by one instance; all zero once it is unmounted.
    pub fn instance_resources(&self, instance: InstanceId) -> ResourceCounts {
        let mut counts = ResourceCounts::default();
        let Some(inst) = self.instances.get(&instance) else {
            return counts;
        };
        for (&handle, reg) in &inst.registrations {
            counts.running_tweens += self.tweens.count_owned_by(handle);
            match reg {
                Registration::Entrance(b) => {
                    counts.observations += 1;
                    counts.callbacks += b.on_complete.len();
                    counts.running_tweens += usize::from(b.player.is_playing());
                }
                Registration::Interaction(rt) => {
                    counts.listeners += rt.targets.len() * rt.kind.listeners_per_target();
                    // document-level move/up listeners while a drag is in flight
                    if rt.is_dragging() {
                        counts.listeners += 2;
                    }
                }
                Registration::Loop(player) => {
                    counts.running_tweens += usize::from(player.is_playing());
                }
                Registration::Timer(_) => counts.timers += 1,
                Registration::Batch(b) => counts.observations += b.targets.len(),
            }
        }
        counts
    }

    /// Number of registrations in the shared intersection observer.
    pub fn observer_registrations(&self) -> usize {
        self.observer.len()
    }

    /// In-flight interaction and scroll tweens across all instances.
    pub fn active_tweens(&self) -> usize {
        self.tweens.len()
    }

    fn max_scroll(&self) -> f64 {
        (self.doc.content_height() - self.viewport.height).max(0.0)
    }

    /// Jump the viewport to `y` (clamped to the document) and cancel any smooth scroll.
    #[tracing::instrument(skip(self))]
    pub fn scroll_to(&mut self, y: f64) {
        self.scroll = None;
        let y = if y.is_finite() { y } else { 0.0 };
        self.viewport.scroll_y = y.clamp(0.0, self.max_scroll());
        self.log.push(
            self.now,
            ControllerEvent::Scrolled {
                y: self.viewport.scroll_y,
                smooth: false,
            },
        );
        self.dispatch_intersections();
    }

    /// Tween the viewport to `y` over the configured smooth-scroll duration.
    ///
    /// Returns the clamped offset the tween approaches.
    pub fn smooth_scroll_to(&mut self, y: f64) -> f64 {
        let to = if y.is_finite() { y } else { 0.0 };
        let to = to.clamp(0.0, self.max_scroll());
        self.scroll = Some(ScrollTween {
            from: self.viewport.scroll_y,
            to,
            start: self.now,
            duration: self.config.smooth_scroll,
            ease: self.config.smooth_scroll_ease,
        });
        to
    }

    /// Return `true` while a smooth scroll is running.
    pub fn is_smooth_scrolling(&self) -> bool {
        self.scroll.is_some()
    }

    fn advance_scroll(&mut self) {
        let Some(s) = self.scroll else {
            return;
        };
        let elapsed = self.now.saturating_sub(s.start);
        let p = if s.duration == Millis::ZERO {
            1.0
        } else {
            (elapsed.0 as f64 / s.duration.0 as f64).min(1.0)
        };
        self.viewport.scroll_y = s.from + (s.to - s.from) * s.ease.apply(p);
        if p >= 1.0 {
            self.scroll = None;
            self.log.push(
                self.now,
                ControllerEvent::Scrolled {
                    y: self.viewport.scroll_y,
                    smooth: true,
                },
            );
        }
    }

    /// Deliver pointer input to every interaction binding.
    #[tracing::instrument(skip(self))]
    pub fn pointer(&mut self, event: PointerEvent) {
        let mut controls = Vec::new();
        let mut stage = Stage {
            doc: &mut self.doc,
            tweens: &mut self.tweens,
            now: self.now,
        };
        for inst in self.instances.values_mut() {
            for (&handle, reg) in inst.registrations.iter_mut() {
                if let Registration::Interaction(rt) = reg {
                    controls.extend(rt.handle(handle, event, &mut stage));
                }
            }
        }
        for control in controls {
            self.control_loop(control);
        }
    }

    /// Advance stage time by `dt`.
    ///
    /// Order: smooth scroll, intersection dispatch, timers, entrance timelines, loops,
    /// interaction and batch tweens.
    pub fn tick(&mut self, dt: Millis) {
        self.now = self.now.saturating_add(dt);
        self.advance_scroll();
        self.dispatch_intersections();
        self.fire_timers();
        self.advance_players(dt);
        self.tweens
            .advance(self.now, &mut self.doc, self.config.default_ease);
    }

    /// Fire every due timer. A tick that skips over many periods fires at most
    /// [`MAX_TIMER_CATCH_UP`] of them and reschedules on the period grid.
    fn fire_timers(&mut self) {
        let now = self.now;
        for inst in self.instances.values_mut() {
            for (&handle, reg) in inst.registrations.iter_mut() {
                let Registration::Timer(timer) = reg else {
                    continue;
                };
                let Some(due) = timer.next_due.filter(|&due| due <= now) else {
                    continue;
                };
                let period = timer.period.0;
                let missed = (now.0 - due.0) / period + 1;
                for i in 0..missed.min(MAX_TIMER_CATCH_UP) {
                    (timer.callback)();
                    let at = due.saturating_add(Millis(period.saturating_mul(i)));
                    self.log.push(at, ControllerEvent::TimerFired { handle });
                }
                if missed > MAX_TIMER_CATCH_UP {
                    tracing::debug!(
                        ?handle,
                        skipped = missed - MAX_TIMER_CATCH_UP,
                        "timer periods dropped"
                    );
                }
                timer.next_due = period
                    .checked_mul(missed)
                    .and_then(|d| due.0.checked_add(d))
                    .map(Millis);
            }
        }
    }

    fn advance_players(&mut self, dt: Millis) {
        for inst in self.instances.values_mut() {
            for (&handle, reg) in inst.registrations.iter_mut() {
                match reg {
                    Registration::Entrance(binding) => {
                        if let Some(ev) = binding.player.advance(dt, &mut self.doc) {
                            let now = self.now;
                            drive(handle, binding, ev.into(), &mut self.doc, &mut self.log, now);
                        }
                    }
                    Registration::Loop(player) => {
                        player.advance(dt, &mut self.doc);
                    }
                    Registration::Interaction(_)
                    | Registration::Timer(_)
                    | Registration::Batch(_) => {}
                }
            }
        }
    }

    fn dispatch_intersections(&mut self) {
        let changes = self.observer.evaluate(&self.doc, &self.viewport);
        let mut groups: Vec<(BindingHandle, IntersectionChange, Vec<ElementId>)> = Vec::new();
        for (handle, target, change) in changes {
            let Some(reg) = self
                .instances
                .get_mut(&handle.instance)
                .and_then(|inst| inst.registrations.get_mut(&handle))
            else {
                continue;
            };
            match reg {
                Registration::Entrance(binding) => drive(
                    handle,
                    binding,
                    Signal::Crossed(change),
                    &mut self.doc,
                    &mut self.log,
                    self.now,
                ),
                Registration::Batch(_) => {
                    match groups
                        .iter_mut()
                        .find(|(h, c, _)| *h == handle && *c == change)
                    {
                        Some((_, _, group)) => group.push(target),
                        None => groups.push((handle, change, vec![target])),
                    }
                }
                Registration::Interaction(_) | Registration::Loop(_) | Registration::Timer(_) => {}
            }
        }
        for (handle, change, group) in groups {
            let Some(Registration::Batch(binding)) = self.registration_mut(handle) else {
                continue;
            };
            let Some(spec) = binding.batch.spec(change).cloned() else {
                continue;
            };
            self.tweens.spawn(handle, &group, &spec, self.now);
            self.log.push(
                self.now,
                ControllerEvent::BatchPlayed {
                    handle,
                    change,
                    targets: group.len(),
                },
            );
        }
    }
}

/// Feed `signal` through the state machine, applying commands until playback settles.
fn drive(
    handle: BindingHandle,
    binding: &mut EntranceBinding,
    signal: Signal,
    doc: &mut Document,
    log: &mut EventLog,
    now: Millis,
) {
    let mut next = Some(signal);
    while let Some(signal) = next.take() {
        let prev = binding.state;
        let (state, command) = step(prev, binding.policy, signal);
        binding.state = state;
        match (prev, state) {
            (EntranceState::Entering, EntranceState::Shown) => {
                log.push(now, ControllerEvent::EntranceCompleted { handle });
                for callback in &mut binding.on_complete {
                    callback();
                }
            }
            (EntranceState::Exiting, EntranceState::Hidden) => {
                log.push(now, ControllerEvent::ExitCompleted { handle });
            }
            _ => {}
        }
        let Some(command) = command else {
            continue;
        };
        match command {
            Command::PlayForward => {
                binding.player.play();
                log.push(now, ControllerEvent::EntranceStarted { handle });
            }
            Command::PlayReverse => {
                binding.player.reverse();
                log.push(now, ControllerEvent::ExitStarted { handle });
            }
            Command::Restart => {
                binding.player.restart();
                log.push(now, ControllerEvent::EntranceStarted { handle });
            }
            Command::Rewind => {
                binding.player.rewind(doc);
                log.push(now, ControllerEvent::EntranceReset { handle });
            }
        }
        next = binding.player.advance(Millis::ZERO, doc).map(Signal::from);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/controller/viewport.rs"]
mod tests;
