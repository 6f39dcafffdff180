#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::runtime::needs_recompose;
    use crate::*;

    fn no_layout(_: &View, _: (u32, u32), _: Option<u64>) -> Result<(Scene, Vec<HitRegion>, Vec<SemNode>)> {
        Ok((Scene::default(), Vec::new(), Vec::new()))
    }

    fn empty_view() -> View {
        View::new(0, ViewKind::Column)
    }

    #[test]
    fn test_signal_basic() {
        let sig = signal(42);
        assert_eq!(sig.get(), 42);

        sig.set(100);
        assert_eq!(sig.get(), 100);

        sig.update(|v| *v += 1);
        assert_eq!(sig.get(), 101);
        assert_eq!(sig.to_string(), "101");
    }

    #[test]
    fn test_signal_subscription() {
        let sig = signal(0);
        let seen = Rc::new(RefCell::new(Vec::new()));

        let seen_clone = seen.clone();
        sig.subscribe(move |v| seen_clone.borrow_mut().push(*v));

        sig.set(42);
        sig.update(|v| *v += 1);
        assert_eq!(*seen.borrow(), vec![42, 43]);
    }

    #[test]
    fn test_signal_write_requests_recompose() {
        let mut sched = Scheduler::new();
        sched.repose(|_| empty_view(), &no_layout).unwrap();
        assert!(!needs_recompose());

        let sig = signal(0u32);
        sig.update(|v| *v += 1);
        assert!(needs_recompose());
    }

    #[test]
    fn test_scope_explicit_dispose() {
        let cleaned_up = Rc::new(RefCell::new(false));

        let scope = Scope::new();
        let cleaned_up_clone = cleaned_up.clone();
        scope.add_disposer(move || {
            *cleaned_up_clone.borrow_mut() = true;
        });

        assert!(!*cleaned_up.borrow());
        scope.dispose();
        assert!(*cleaned_up.borrow());
    }

    #[test]
    fn test_scope_run_restores_previous() {
        assert!(current_scope().is_none());
        let outer = Scope::new();
        outer.run(|| {
            assert!(current_scope().is_some());
            Scope::new().run(|| assert!(current_scope().is_some()));
            assert!(current_scope().is_some());
        });
        assert!(current_scope().is_none());
    }

    #[test]
    fn test_key_based_remember() {
        let val1 = remember_with_key("test", || 42);
        let val2 = remember_with_key("test", || 100);

        // Same instance: the key already exists
        assert_eq!(*val1, 42);
        assert_eq!(*val2, 42);
    }

    #[test]
    fn test_order_based_slots_are_independent_and_persist() {
        let mut sched = Scheduler::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let build = {
            let seen = seen.clone();
            move |_: &mut Scheduler| {
                let a = remember(|| signal(0u32));
                let b = remember(|| signal(0u32));
                seen.borrow_mut().push((a.get(), b.get()));
                a.update(|v| *v += 1);
                empty_view()
            }
        };

        for _ in 0..3 {
            sched.repose(build.clone(), &no_layout).unwrap();
        }
        assert_eq!(*seen.borrow(), vec![(0, 0), (1, 0), (2, 0)]);
    }

    #[test]
    fn test_remember_state_keeps_mutations() {
        let mut sched = Scheduler::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let build = {
            let seen = seen.clone();
            move |_: &mut Scheduler| {
                let hits = remember_state(|| 0u32);
                *hits.borrow_mut() += 1;
                seen.borrow_mut().push(*hits.borrow());
                empty_view()
            }
        };

        sched.repose(build.clone(), &no_layout).unwrap();
        sched.repose(build, &no_layout).unwrap();
        assert_eq!(*seen.borrow(), vec![1, 2]);
    }

    #[test]
    fn test_unmount_runs_effects_and_drops_slots() {
        let unmounted = Rc::new(RefCell::new(0));
        let mut sched = Scheduler::new();

        let counts = Rc::new(RefCell::new(Vec::new()));

        let mut build = {
            let unmounted = unmounted.clone();
            let counts = counts.clone();
            move |_: &mut Scheduler| {
                let unmounted = unmounted.clone();
                remember(move || {
                    effect(move || on_unmount(move || *unmounted.borrow_mut() += 1))
                });
                let count = remember(|| signal(0u32));
                count.update(|v| *v += 1);
                counts.borrow_mut().push(count.get());
                empty_view()
            }
        };

        sched.repose(&mut build, &no_layout).unwrap();
        sched.repose(&mut build, &no_layout).unwrap();
        assert!(sched.is_mounted());
        assert_eq!(*unmounted.borrow(), 0);

        sched.unmount();
        assert!(!sched.is_mounted());
        assert_eq!(*unmounted.borrow(), 1);

        // Fresh slots after remounting
        sched.repose(&mut build, &no_layout).unwrap();
        assert_eq!(*counts.borrow(), vec![1, 2, 1]);
    }

    #[test]
    fn test_second_root_on_same_thread_is_refused() {
        let mut first = Scheduler::new();
        let mut second = Scheduler::new();
        first.repose(|_| empty_view(), &no_layout).unwrap();

        let err = second.repose(|_| empty_view(), &no_layout).unwrap_err();
        assert!(matches!(err, Error::AlreadyMounted));
        assert!(!second.is_mounted());

        first.unmount();
        second.repose(|_| empty_view(), &no_layout).unwrap();
        assert!(second.is_mounted());
    }

    #[test]
    fn test_dropping_a_mounted_scheduler_frees_the_thread() {
        let ran = Rc::new(RefCell::new(false));
        {
            let ran = ran.clone();
            let mut sched = Scheduler::new();
            sched
                .repose(
                    move |_| {
                        let ran = ran.clone();
                        remember(move || effect(move || on_unmount(move || *ran.borrow_mut() = true)));
                        empty_view()
                    },
                    &no_layout,
                )
                .unwrap();
        }
        assert!(*ran.borrow());
        Scheduler::new().repose(|_| empty_view(), &no_layout).unwrap();
    }

    #[test]
    fn test_stale_focus_is_cleared() {
        let mut sched = Scheduler::new();
        sched.focused = Some(7);
        sched.repose(|_| empty_view(), &no_layout).unwrap();
        assert_eq!(sched.focused, None);
    }

    #[test]
    fn test_color_from_hex() {
        let c = Color::from_hex("#FF5733");
        assert_eq!(c, Color(255, 87, 51, 255));

        let c_alpha = Color::from_hex("#FF5733AA");
        assert_eq!(c_alpha, Color(255, 87, 51, 170));

        assert_eq!(Color::from_hex("#zz"), Color::BLACK);
    }

    #[test]
    fn test_rect_contains() {
        let rect = Rect {
            x: 10.0,
            y: 10.0,
            w: 100.0,
            h: 50.0,
        };

        assert!(rect.contains(Vec2 { x: 50.0, y: 30.0 }));
        assert!(!rect.contains(Vec2 { x: 5.0, y: 30.0 }));
        assert!(!rect.contains(Vec2 { x: 50.0, y: 70.0 }));
        assert!(rect.contains(rect.center()));
    }

    #[test]
    fn test_theme_override_is_scoped() {
        let custom = Theme {
            focus: Color::WHITE,
            ..Theme::default()
        };
        with_theme(custom, || assert_eq!(theme().focus, Color::WHITE));
        assert_eq!(theme(), Theme::default());
    }
}
