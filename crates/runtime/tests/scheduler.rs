//! Think scheduler and worker behavior under tokio's paused clock.

use std::sync::Arc;
use std::time::Duration;

use combat_core::{
    ActorId, ActorTemplate, AiConfig, Capabilities, Character, FactionId, InMemoryWorld,
    InstanceId, Intention, IntentionKind, NpcInfo, Order, Position, Role, VisualEffect,
    WorldOracle,
};
use runtime::{
    ActorSpawn, AiRuntime, CombatEvent, DiagnosticEvent, Event, IntentionEvent, RuntimeConfig,
    Spawn, Topic,
};
use tokio::time::{sleep, timeout};

const ORC: ActorId = ActorId(1);
const ALLY: ActorId = ActorId(2);
const PLAYER: ActorId = ActorId(100);
const PATIENCE: Duration = Duration::from_secs(30);

fn orc(id: ActorId, position: Position) -> Character {
    let info = NpcInfo {
        role: Role::Monster,
        factions: vec![FactionId(1)],
        aggressive: true,
        attackable: true,
    };
    Character::npc(id, info, position).with_collision(20)
}

fn orc_template() -> Arc<ActorTemplate> {
    Arc::new(
        ActorTemplate::new("orc", Role::Monster)
            .with_capabilities(Capabilities::AGGRESSIVE)
            .with_aggro_range(300)
            .with_factions(vec![FactionId(1)], 300),
    )
}

fn runtime_over(world: Arc<InMemoryWorld>) -> AiRuntime {
    AiRuntime::builder()
        .sandbox(world)
        .ai_config(AiConfig {
            spawn_global_aggro: 0,
            ..AiConfig::default()
        })
        .config(RuntimeConfig {
            seed: Some(7),
            ..RuntimeConfig::default()
        })
        .build()
        .unwrap()
}

fn spawn(runtime: &AiRuntime, id: ActorId, idle: bool) -> runtime::AiHandle {
    let request = ActorSpawn::new(id, orc_template()).at(Spawn::fixed(Position::default()));
    let request = if idle { request.idle() } else { request };
    runtime.spawn(request).unwrap()
}

#[tokio::test(start_paused = true)]
async fn active_actor_notices_a_player_and_attacks() {
    let world = Arc::new(InMemoryWorld::new());
    world.insert(orc(ORC, Position::default())).unwrap();
    world
        .insert(Character::player(PLAYER, Position::new(100, 0, 0)))
        .unwrap();
    let runtime = runtime_over(world.clone());
    let mut intentions = runtime.subscribe(Topic::Intention);

    let orc = spawn(&runtime, ORC, false);
    let attacking = timeout(PATIENCE, orc.wait_for_intention(IntentionKind::Attack))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(attacking, Intention::Attack { target: PLAYER });

    sleep(Duration::from_secs(5)).await;
    assert!(world.orders_of(ORC).contains(&Order::Attack {
        actor: ORC,
        target: PLAYER
    }));

    let first = intentions.recv().await.unwrap();
    assert_eq!(
        first,
        Event::Intention(IntentionEvent {
            actor: ORC,
            from: IntentionKind::Idle,
            to: IntentionKind::Active,
            tick: 0,
        })
    );
    runtime.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn idle_actor_does_not_tick_until_attacked() {
    let world = Arc::new(InMemoryWorld::new());
    world.insert(orc(ORC, Position::default())).unwrap();
    world
        .insert(Character::player(PLAYER, Position::new(600, 0, 0)))
        .unwrap();
    let runtime = runtime_over(world.clone());
    let orc = spawn(&runtime, ORC, true);

    sleep(Duration::from_secs(10)).await;
    assert_eq!(orc.intention(), Intention::Idle);
    assert!(world.orders_of(ORC).is_empty());

    orc.attacked(PLAYER, 40).unwrap();
    timeout(PATIENCE, orc.wait_for_intention(IntentionKind::Attack))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(orc.attack_target(), Some(PLAYER));

    sleep(Duration::from_secs(5)).await;
    assert!(world.orders_of(ORC).iter().any(|order| matches!(
        order,
        Order::MoveToPawn { target, .. } | Order::Attack { target, .. } if *target == PLAYER
    )));
    runtime.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn faction_call_reaches_an_idle_ally() {
    let world = Arc::new(InMemoryWorld::new());
    world.insert(orc(ORC, Position::default())).unwrap();
    world.insert(orc(ALLY, Position::new(100, 0, 0))).unwrap();
    world
        .insert(Character::player(PLAYER, Position::new(50, 0, 0)))
        .unwrap();
    let runtime = runtime_over(world.clone());
    let orc = spawn(&runtime, ORC, true);
    let ally = spawn(&runtime, ALLY, true);

    orc.attacked(PLAYER, 30).unwrap();
    let joined = timeout(PATIENCE, ally.wait_for_intention(IntentionKind::Attack))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(joined, Intention::Attack { target: PLAYER });
    runtime.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn fear_runs_for_its_duration_then_idles() {
    let world = Arc::new(InMemoryWorld::new());
    world.insert(orc(ORC, Position::default())).unwrap();
    world
        .insert(Character::player(PLAYER, Position::new(3500, 0, 0)))
        .unwrap();
    let runtime = runtime_over(world.clone());
    let mut combat = runtime.subscribe(Topic::Combat);
    let orc = spawn(&runtime, ORC, true);

    orc.afraid(PLAYER, Duration::from_secs(10)).unwrap();
    let fleeing = timeout(
        PATIENCE,
        orc.wait_for(|status| status.afraid && matches!(status.intention, Intention::MoveTo { .. })),
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(fleeing.attack_target, None);

    timeout(PATIENCE, orc.wait_for(|status| !status.afraid))
        .await
        .unwrap()
        .unwrap();

    let mut seen = Vec::new();
    while let Ok(event) = combat.try_recv() {
        seen.push(event);
    }
    assert!(matches!(
        seen.first(),
        Some(Event::Combat(CombatEvent::FearStarted { actor: ORC, .. }))
    ));
    assert!(
        seen.iter()
            .any(|event| matches!(event, Event::Combat(CombatEvent::FearEnded { actor: ORC, .. })))
    );
    assert!(world.orders_of(ORC).contains(&Order::Visual {
        actor: ORC,
        effect: VisualEffect::TurnFlee,
        enabled: false,
    }));
    runtime.shutdown().await.unwrap();
}

/// World that panics whenever an actor looks around.
struct FaultyWorld(Arc<InMemoryWorld>);

impl WorldOracle for FaultyWorld {
    fn character(&self, id: ActorId) -> Option<Character> {
        self.0.character(id)
    }

    fn known_characters(&self, _around: ActorId, _radius: i32) -> Vec<Character> {
        panic!("scan exploded")
    }

    fn can_see(&self, from: ActorId, to: ActorId) -> bool {
        self.0.can_see(from, to)
    }

    fn can_move(&self, from: Position, to: Position, instance: InstanceId) -> bool {
        self.0.can_move(from, to, instance)
    }

    fn move_check(&self, from: Position, to: Position, instance: InstanceId) -> Position {
        self.0.move_check(from, to, instance)
    }

    fn in_peace_zone(&self, position: Position) -> bool {
        self.0.in_peace_zone(position)
    }

    fn has_visible_players(&self, id: ActorId) -> bool {
        self.0.has_visible_players(id)
    }

    fn random_territory_point(&self, id: ActorId) -> Option<Position> {
        self.0.random_territory_point(id)
    }

    fn rift_room_contains(&self, room: u8, position: Position) -> bool {
        self.0.rift_room_contains(room, position)
    }

    fn is_auto_attackable(&self, target: ActorId, by: ActorId) -> bool {
        self.0.is_auto_attackable(target, by)
    }
}

#[tokio::test(start_paused = true)]
async fn panicking_think_is_trapped_and_the_actor_keeps_ticking() {
    let world = Arc::new(InMemoryWorld::new());
    world.insert(orc(ORC, Position::default())).unwrap();
    let runtime = AiRuntime::builder()
        .world(Arc::new(FaultyWorld(world.clone())))
        .combat(world.clone())
        .ai_config(AiConfig {
            spawn_global_aggro: 0,
            ..AiConfig::default()
        })
        .seed(3)
        .build()
        .unwrap();
    let mut diagnostics = runtime.subscribe(Topic::Diagnostics);
    let orc = spawn(&runtime, ORC, false);

    for _ in 0..2 {
        let event = timeout(PATIENCE, diagnostics.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(
            event,
            Event::Diagnostics(DiagnosticEvent::ThinkPanicked {
                actor: ORC,
                message: "scan exploded".to_string(),
            })
        );
    }

    orc.set_intention(Intention::Idle).unwrap();
    timeout(PATIENCE, orc.wait_for_intention(IntentionKind::Idle))
        .await
        .unwrap()
        .unwrap();
    runtime.shutdown().await.unwrap();
}
