//! Integration tests for the landing state machine inside a Bevy app.
//!
//! Contacts are written directly as `LandingInput` messages, the way a
//! physics backend or game code would report them.

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use msg_landing_controller::effects::SplashParticles;
use msg_landing_controller::prelude::*;

const OBJECT_Z: f32 = 10.0;

#[derive(Resource, Default)]
struct RecordedEvents(Vec<LandingEvent>);

#[derive(Resource, Default)]
struct RecordedInputs(Vec<LandingInput>);

fn record_inputs(mut reader: MessageReader<LandingInput>, mut recorded: ResMut<RecordedInputs>) {
    recorded.0.extend(reader.read().copied());
}

fn record_events(mut reader: MessageReader<LandingEvent>, mut recorded: ResMut<RecordedEvents>) {
    recorded.0.extend(reader.read().copied());
}

/// Create a minimal test app with the physics-free backend.
fn create_test_app() -> App {
    let mut app = App::new();

    app.add_plugins(MinimalPlugins);
    app.add_plugins(TransformPlugin);
    app.add_plugins(LandingPlugin::<LinkBackend>::default());
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(50)));
    app.init_resource::<RecordedEvents>();
    app.init_resource::<RecordedInputs>();
    app.add_systems(
        Update,
        (record_events, record_inputs).after(LandingSet::Transitions),
    );

    app.finish();
    app.cleanup();
    app
}

/// Spawn a floating object with a white body sprite and a red child sprite.
fn spawn_object(app: &mut App, controller: LandingController) -> Entity {
    let entity = app
        .world_mut()
        .spawn((
            controller,
            Transform::from_xyz(0.0, 0.0, OBJECT_Z),
            Sprite::from_color(Color::WHITE, Vec2::ONE),
            children![(
                Sprite::from_color(Color::srgb(1.0, 0.0, 0.0), Vec2::splat(0.5)),
                Transform::from_xyz(0.0, 0.25, 0.1),
            )],
        ))
        .id();
    app.update();
    entity
}

fn spawn_surface(app: &mut App, position: Vec2) -> Entity {
    app.world_mut()
        .spawn((Landable, Transform::from_translation(position.extend(0.0))))
        .id()
}

fn send(app: &mut App, inputs: impl IntoIterator<Item = LandingInput>) {
    for input in inputs {
        app.world_mut().write_message(input);
    }
    app.update();
}

fn controller(app: &App, entity: Entity) -> &LandingController {
    app.world().get::<LandingController>(entity).unwrap()
}

fn events(app: &App) -> Vec<LandingEventKind> {
    app.world()
        .resource::<RecordedEvents>()
        .0
        .iter()
        .map(|e| e.kind)
        .collect()
}

fn sprite_colors(app: &App, entity: Entity) -> Vec<Color> {
    let mut colors = vec![app.world().get::<Sprite>(entity).unwrap().color];
    for child in app.world().get::<Children>(entity).unwrap()[..].iter() {
        colors.push(app.world().get::<Sprite>(*child).unwrap().color);
    }
    colors
}

fn link_count(app: &mut App) -> usize {
    app.world_mut()
        .query::<&SurfaceLink>()
        .iter(app.world())
        .count()
}

#[test]
fn lands_on_first_contacted_surface() {
    let mut app = create_test_app();
    let object = spawn_object(
        &mut app,
        LandingController::new().with_anchor_point(Vec2::new(0.0, -0.5)),
    );
    let a = spawn_surface(&mut app, Vec2::new(0.0, -1.0));
    let b = spawn_surface(&mut app, Vec2::new(3.0, -1.0));
    app.update();

    send(
        &mut app,
        [
            LandingInput::SurfaceEntered { object, surface: a },
            LandingInput::SurfaceEntered { object, surface: b },
            LandingInput::TryLand(object),
        ],
    );

    let state = controller(&app, object);
    assert!(state.is_grounded());
    let attachment = state.attachment().expect("grounded objects are attached");
    assert_eq!(attachment.surface, a);

    let link = app.world().get::<SurfaceLink>(attachment.link).unwrap();
    assert_eq!(link.body, object);
    assert_eq!(link.surface, a);
    // Object at origin, anchor 0.5 below, surface 1.0 below.
    assert!((link.anchors.surface_local - Vec2::new(0.0, 0.5)).length() < 1e-5);
    assert!((link.anchors.body_local - Vec2::new(0.0, -0.5)).length() < 1e-5);

    assert_eq!(events(&app), vec![LandingEventKind::Landed]);
}

#[test]
fn non_landable_surfaces_are_ignored() {
    let mut app = create_test_app();
    let object = spawn_object(&mut app, LandingController::new());
    let rock = app.world_mut().spawn(Transform::default()).id();

    send(
        &mut app,
        [LandingInput::SurfaceEntered {
            object,
            surface: rock,
        }],
    );

    assert!(!controller(&app, object).can_land());
}

#[test]
fn failed_landing_sinks_with_feedback() {
    let mut app = create_test_app();
    let object = spawn_object(&mut app, LandingController::new());

    send(&mut app, [LandingInput::TryLand(object)]);

    let state = controller(&app, object);
    assert!(state.is_submerged());
    assert!(state.attachment().is_none());
    assert_eq!(
        state.saved_appearance(),
        Some([Color::WHITE, Color::srgb(1.0, 0.0, 0.0)].as_slice())
    );

    let transform = app.world().get::<Transform>(object).unwrap();
    assert!((transform.scale - Vec3::new(0.8, 0.8, 1.0)).length() < 1e-6);
    assert_eq!(transform.translation.z, OBJECT_Z - 500.0);

    let dim = LandingConfig::default().sinking.dim_color();
    assert!(sprite_colors(&app, object).iter().all(|&c| c == dim));

    let splashes = app
        .world_mut()
        .query_filtered::<Entity, With<SplashParticles>>()
        .iter(app.world())
        .count();
    assert_eq!(splashes, 1);
    assert_eq!(events(&app), vec![LandingEventKind::Sank]);
}

#[test]
fn repeated_sink_is_ignored() {
    let mut app = create_test_app();
    let object = spawn_object(&mut app, LandingController::new());

    send(&mut app, [LandingInput::Sink(object), LandingInput::Sink(object)]);
    send(&mut app, [LandingInput::Sink(object)]);

    let transform = app.world().get::<Transform>(object).unwrap();
    assert!((transform.scale - Vec3::new(0.8, 0.8, 1.0)).length() < 1e-6);
    assert_eq!(events(&app), vec![LandingEventKind::Sank]);
}

#[test]
fn surfacing_restores_appearance() {
    let mut app = create_test_app();
    let object = spawn_object(&mut app, LandingController::new());
    let original = sprite_colors(&app, object);

    send(&mut app, [LandingInput::Sink(object)]);
    send(&mut app, [LandingInput::Surface(object)]);

    assert!(controller(&app, object).is_airborne());
    assert_eq!(sprite_colors(&app, object), original);
    let transform = app.world().get::<Transform>(object).unwrap();
    assert!((transform.scale - Vec3::ONE).length() < 1e-6);
    assert_eq!(transform.translation.z, OBJECT_Z);
    assert_eq!(
        events(&app),
        vec![LandingEventKind::Sank, LandingEventKind::Surfaced]
    );
}

#[test]
fn surface_request_while_airborne_does_nothing() {
    let mut app = create_test_app();
    let object = spawn_object(&mut app, LandingController::new());

    send(&mut app, [LandingInput::Surface(object)]);

    assert!(controller(&app, object).is_airborne());
    let transform = app.world().get::<Transform>(object).unwrap();
    assert_eq!(transform.scale, Vec3::ONE);
    assert!(events(&app).is_empty());
}

#[test]
fn losing_last_surface_while_grounded_sinks() {
    let mut app = create_test_app();
    let object = spawn_object(&mut app, LandingController::new());
    let a = spawn_surface(&mut app, Vec2::new(0.0, -1.0));
    app.update();

    send(
        &mut app,
        [
            LandingInput::SurfaceEntered { object, surface: a },
            LandingInput::TryLand(object),
        ],
    );
    assert_eq!(link_count(&mut app), 1);

    send(&mut app, [LandingInput::SurfaceExited { object, surface: a }]);

    assert!(controller(&app, object).is_submerged());
    assert_eq!(link_count(&mut app), 0);
    assert_eq!(
        events(&app),
        vec![LandingEventKind::Landed, LandingEventKind::Sank]
    );
}

#[test]
fn physical_contact_knocks_object_loose() {
    let mut app = create_test_app();
    let object = spawn_object(&mut app, LandingController::new());
    let a = spawn_surface(&mut app, Vec2::new(0.0, -1.0));
    app.update();

    send(
        &mut app,
        [
            LandingInput::SurfaceEntered { object, surface: a },
            LandingInput::TryLand(object),
            LandingInput::PhysicalContact { object },
        ],
    );

    let state = controller(&app, object).clone();
    assert!(state.is_airborne());
    assert!(state.attachment().is_none());
    assert_eq!(link_count(&mut app), 0);
    // The surface is still overlapping, so the object can land again.
    assert_eq!(state.candidate_surfaces(), &[a]);
}

#[test]
fn landing_on_spawn_waits_for_delay() {
    let mut app = create_test_app();
    let object = app
        .world_mut()
        .spawn((
            LandingController::new().landing_on_spawn(),
            Transform::default(),
        ))
        .id();

    app.update();
    assert!(controller(&app, object).is_airborne());

    for _ in 0..10 {
        app.update();
    }

    // Nothing to land on, so the attempt sinks the object.
    assert!(controller(&app, object).is_submerged());
    assert_eq!(events(&app), vec![LandingEventKind::Sank]);
}

#[test]
fn landing_on_spawn_grounds_on_overlapping_surface() {
    let mut app = create_test_app();
    let surface = spawn_surface(&mut app, Vec2::new(0.0, -1.0));
    let object = app
        .world_mut()
        .spawn((
            LandingController::new().landing_on_spawn(),
            Transform::default(),
        ))
        .id();

    send(&mut app, [LandingInput::SurfaceEntered { object, surface }]);
    for _ in 0..10 {
        app.update();
    }

    assert!(controller(&app, object).is_grounded());
    assert_eq!(events(&app), vec![LandingEventKind::Landed]);
}

#[test]
fn splash_particles_expire() {
    let mut app = create_test_app();
    let object = app
        .world_mut()
        .spawn((
            LandingController::new(),
            LandingConfig {
                splash_lifetime: 0.1,
                ..default()
            },
            Transform::default(),
        ))
        .id();
    app.update();

    send(&mut app, [LandingInput::Sink(object)]);
    let mut q_splashes = app.world_mut().query::<&SplashParticles>();
    assert_eq!(q_splashes.iter(app.world()).count(), 1);

    for _ in 0..10 {
        app.update();
    }
    assert_eq!(q_splashes.iter(app.world()).count(), 0);
}

#[test]
fn inputs_for_unknown_entities_are_skipped() {
    let mut app = create_test_app();
    let stranger = app.world_mut().spawn(Transform::default()).id();

    send(&mut app, [LandingInput::TryLand(stranger)]);

    assert!(events(&app).is_empty());
}

#[test]
fn inputs_stay_visible_to_other_readers() {
    let mut app = create_test_app();
    let object = spawn_object(&mut app, LandingController::new());

    send(&mut app, [LandingInput::Sink(object)]);
    app.update();

    assert!(controller(&app, object).is_submerged());
    assert_eq!(
        app.world().resource::<RecordedInputs>().0,
        vec![LandingInput::Sink(object)]
    );
    assert_eq!(events(&app), vec![LandingEventKind::Sank]);
}
