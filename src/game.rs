//! This module contains the main game logic and state.

use bevy_ecs::event::{EventRegistry, Events};
use bevy_ecs::schedule::{IntoScheduleConfigs, Schedule, SystemSet};
use bevy_ecs::world::World;
use glam::IVec2;
use rand::rngs::SmallRng;
use sdl2::event::EventType;
use sdl2::render::Canvas;
use sdl2::video::Window;
use sdl2::EventPump;
use tracing::{debug, info, warn};

use crate::config::Options;
use crate::constants::player::{DM_STEP_TIME, START, STEP_TIME};
use crate::crafting::CraftingState;
use crate::error::{GameError, GameResult};
use crate::events::{GameEvent, PointerEvent};
use crate::inventory::Inventory;
use crate::systems::{
    self, profile, Bindings, DebugState, DeltaTime, GlobalState, PlayerBundle, PlayerControlled, PointerState, Position,
    Settings, SimRng, SystemId, SystemTimings, Timing, Walker, WindowFocus, Wielding,
};
use crate::things::{Kind, Stack, Thing, ToolKind, Workstation};
use crate::ui::Viewport;
use crate::world::generation::Generated;
use crate::world::WorldMap;

/// What a dungeon master starts out carrying.
pub const DM_KIT: [Stack; 4] = [
    Stack::one(Thing::tool(ToolKind::Woodaxe, Kind::Stone)),
    Stack::one(Thing::tool(ToolKind::Pickaxe, Kind::Iron)),
    Stack::new(3, Thing::Station(Workstation::CampFire)),
    Stack::one(Thing::tool(ToolKind::Pickaxe, Kind::Diamond)),
];

/// System set for all gameplay systems to ensure they run after input processing
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
enum GameplaySet {
    /// Polling SDL and turning input into commands
    Input,
    /// Systems that advance the world
    Update,
    /// Systems that report on what happened
    Respond,
}

/// System set for all rendering systems to ensure they run after gameplay logic
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
enum RenderSet {
    Draw,
    Present,
}

/// Core game state manager built on the Bevy ECS architecture.
///
/// The `World` holds the map, the player and creature entities, and every resource the
/// systems share; the `Schedule` runs input, simulation, and drawing in that order each frame.
/// SDL2 handles live in the world as non-send resources.
pub struct Game {
    pub world: World,
    pub schedule: Schedule,
}

impl Game {
    /// Builds the ECS world around an already generated map.
    ///
    /// # Errors
    ///
    /// Returns `GameError` if the player cannot be placed or its starting kit does not fit.
    pub fn new(
        canvas: Canvas<Window>,
        mut event_pump: EventPump,
        options: &Options,
        generated: Generated,
        rng: SmallRng,
    ) -> GameResult<Game> {
        info!("Starting game initialization");

        debug!("Disabling unnecessary SDL events");
        Self::disable_sdl_events(&mut event_pump);

        let (width, height) = canvas.output_size().map_err(|e| GameError::Sdl(e.to_string()))?;

        let mut world = World::default();
        let mut schedule = Schedule::default();

        Self::populate(&mut world, options, generated, rng, Viewport::new(width, height))?;

        debug!("Inserting SDL resources into ECS world");
        world.insert_non_send_resource::<&mut EventPump>(Box::leak(Box::new(event_pump)));
        world.insert_non_send_resource::<&mut Canvas<Window>>(Box::leak(Box::new(canvas)));

        debug!("Configuring system execution schedule");
        Self::configure_schedule(&mut schedule);

        info!("Game initialization completed successfully");
        Ok(Game { world, schedule })
    }

    /// Everything but the SDL handles: events, gameplay resources, the player, and the creatures.
    pub fn populate(
        world: &mut World,
        options: &Options,
        generated: Generated,
        mut rng: SmallRng,
        viewport: Viewport,
    ) -> GameResult<()> {
        Self::setup_ecs(world);

        let Generated { map, spawns } = generated;
        let player = Self::create_player_bundle(&map, options.dm)?;
        info!(at = ?player.position.0, dm = options.dm, "Spawning player");

        let spawned = systems::spawn_creatures(world, &spawns, &mut rng);
        info!(creatures = spawned, "Spawned creatures");
        world.spawn(player);

        Self::insert_resources(world, options, map, rng, viewport);
        Ok(())
    }

    fn disable_sdl_events(event_pump: &mut EventPump) {
        for event_type in [
            EventType::JoyAxisMotion,
            EventType::JoyBallMotion,
            EventType::JoyHatMotion,
            EventType::JoyButtonDown,
            EventType::JoyButtonUp,
            EventType::ControllerAxisMotion,
            EventType::ControllerButtonDown,
            EventType::ControllerButtonUp,
            EventType::FingerDown,
            EventType::FingerUp,
            EventType::FingerMotion,
            EventType::DollarGesture,
            EventType::MultiGesture,
            EventType::DropFile,
            EventType::DropText,
            EventType::TextInput,
            EventType::TextEditing,
        ] {
            event_pump.disable_event(event_type);
        }
    }

    fn setup_ecs(world: &mut World) {
        EventRegistry::register_event::<GameError>(world);
        EventRegistry::register_event::<GameEvent>(world);
        EventRegistry::register_event::<PointerEvent>(world);
    }

    fn create_player_bundle(map: &WorldMap, dm: bool) -> GameResult<PlayerBundle> {
        let start = map.find_empty_spot_near(IVec2::new(START.0, START.1))?;
        let mut inventory = Inventory::default();
        let step_time = if dm {
            for stack in DM_KIT {
                inventory.add(stack)?;
            }
            DM_STEP_TIME
        } else {
            STEP_TIME
        };

        Ok(PlayerBundle {
            player: PlayerControlled,
            position: Position(start),
            walker: Walker::new(step_time),
            wielding: Wielding::default(),
            inventory,
        })
    }

    fn insert_resources(world: &mut World, options: &Options, map: WorldMap, rng: SmallRng, viewport: Viewport) {
        world.insert_resource(map);
        world.insert_resource(viewport);
        world.insert_resource(SimRng(rng));
        world.insert_resource(GlobalState { exit: false });
        world.insert_resource(Settings {
            overclock: options.overclock,
        });
        world.insert_resource(SystemTimings::default());
        world.insert_resource(Timing::default());
        world.insert_resource(Bindings::default());
        world.insert_resource(DeltaTime::default());
        world.insert_resource(DebugState { enabled: options.debug });
        world.insert_resource(CraftingState::default());
        world.insert_resource(PointerState::default());
        world.insert_resource(WindowFocus::default());
    }

    fn configure_schedule(schedule: &mut Schedule) {
        let input_system = profile(SystemId::Input, systems::input_system);
        let pointer_system = profile(SystemId::Pointer, systems::pointer_system);
        let player_control_system = profile(SystemId::PlayerControls, systems::player_control_system);
        let fullscreen_system = profile(SystemId::Fullscreen, systems::fullscreen_system);
        let player_walk_system = profile(SystemId::PlayerWalk, systems::player_walk_system);
        let player_wield_system = profile(SystemId::PlayerWield, systems::player_wield_system);
        let creature_system = profile(SystemId::Creatures, systems::creature_system);
        let plant_growth_system = profile(SystemId::Plants, systems::plant_growth_system);
        let crafting_system = profile(SystemId::Crafting, systems::crafting_system);
        let census_system = profile(SystemId::Census, systems::census_system);
        let error_log_system = profile(SystemId::ErrorLog, systems::error_log_system);
        let world_render_system = profile(SystemId::WorldRender, systems::world_render_system);
        let hud_render_system = profile(SystemId::HudRender, systems::hud_render_system);
        let crafting_render_system = profile(SystemId::CraftingRender, systems::crafting_render_system);
        let debug_render_system = profile(SystemId::DebugRender, systems::debug_render_system);
        let present_system = profile(SystemId::Present, systems::present_system);

        schedule
            .add_systems((
                (input_system, pointer_system, player_control_system, fullscreen_system)
                    .chain()
                    .in_set(GameplaySet::Input),
                (
                    player_walk_system,
                    player_wield_system,
                    creature_system,
                    plant_growth_system,
                    crafting_system,
                )
                    .chain()
                    .in_set(GameplaySet::Update),
                (census_system, error_log_system).chain().in_set(GameplaySet::Respond),
                (
                    world_render_system,
                    hud_render_system,
                    crafting_render_system,
                    debug_render_system,
                )
                    .chain()
                    .in_set(RenderSet::Draw),
                present_system.in_set(RenderSet::Present),
            ))
            .configure_sets(
                (
                    GameplaySet::Input,
                    GameplaySet::Update,
                    GameplaySet::Respond,
                    RenderSet::Draw,
                    RenderSet::Present,
                )
                    .chain(),
            );
    }

    /// Drops events every reader has had a full frame to see.
    pub fn update_events(world: &mut World) {
        world.resource_mut::<Events<GameEvent>>().update();
        world.resource_mut::<Events<PointerEvent>>().update();
        world.resource_mut::<Events<GameError>>().update();
    }

    /// Executes one frame of game logic by running all scheduled ECS systems.
    ///
    /// `dt` is simulated time in seconds, already scaled by the overclock factor.
    ///
    /// # Returns
    ///
    /// `true` if the game should terminate (exit command received), `false` to continue
    pub fn tick(&mut self, dt: f32) -> bool {
        self.world.insert_resource(DeltaTime::from_seconds(dt));

        let start = std::time::Instant::now();
        self.schedule.run(&mut self.world);
        Self::update_events(&mut self.world);
        let total_duration = start.elapsed();

        let overclock = self.world.get_resource::<Settings>().map_or(1, |s| s.overclock.max(1));
        if let (Some(timings), Some(timing)) = (
            self.world.get_resource::<SystemTimings>(),
            self.world.get_resource::<Timing>(),
        ) {
            let new_tick = timing.increment_tick();
            timings.add_total_timing(total_duration, new_tick);

            // The budget is in real time, so undo the overclock.
            let frame_budget_ms = (dt / overclock as f32 * 1000.0 * 1.2) as u128;

            if total_duration.as_millis() > frame_budget_ms {
                let slowest_systems = timings.get_slowest_systems();
                let systems_context = if slowest_systems.is_empty() {
                    "No specific systems identified".to_string()
                } else {
                    slowest_systems
                        .iter()
                        .map(|(id, duration)| format!("{} ({:.2?})", id, duration))
                        .collect::<Vec<String>>()
                        .join(", ")
                };

                warn!(
                    total = format!("{:.3?}", total_duration),
                    tick = new_tick,
                    systems = systems_context,
                    budget = format!("{:.1}ms", frame_budget_ms),
                    "Frame took longer than expected"
                );
            }
        }

        self.world.get_resource::<GlobalState>().is_none_or(|state| state.exit)
    }
}
