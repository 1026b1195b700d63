//! The seed city: four districts with their activities.
//!
//! This is the static map every session starts from. Districts are
//! never created or removed at runtime; the only mutation is the
//! participant counter on activities. Timed activities get start times
//! relative to the seeding instant.

use symbiocity_types::{Activity, ActivityType, District};

/// Seconds until the office team sync starts (30 minutes).
const MEETING_OFFSET: u64 = 1800;

/// Seconds until the group meditation starts (10 minutes).
const MEDITATION_OFFSET: u64 = 600;

/// Seconds until the virtual concert starts (1 hour).
const CONCERT_OFFSET: u64 = 3600;

/// Build the four seed districts, stamping timed activities relative
/// to `now` (virtual units).
pub fn starting_districts(now: u64) -> Vec<District> {
    vec![
        District {
            id: String::from("home"),
            name: String::from("Home District"),
            description: String::from(
                "Your personal sanctuary with smart home automation and wellness monitoring.",
            ),
            position: [0.0, 0.0, 0.0],
            color: String::from("hsl(140, 100%, 60%)"),
            icon: String::from("\u{1f3e0}"),
            available: true,
            population: 1,
            activities: vec![
                Activity {
                    id: String::from("sleep"),
                    name: String::from("Rest & Recovery"),
                    description: String::from(
                        "Optimize your sleep with AI-guided environment control.",
                    ),
                    activity_type: ActivityType::Health,
                    duration_minutes: 480,
                    capacity: 1,
                    current_participants: 0,
                    starts_at: None,
                },
                Activity {
                    id: String::from("workout"),
                    name: String::from("Personal Fitness"),
                    description: String::from(
                        "VR fitness routines tailored to your health goals.",
                    ),
                    activity_type: ActivityType::Health,
                    duration_minutes: 45,
                    capacity: 1,
                    current_participants: 0,
                    starts_at: None,
                },
            ],
        },
        District {
            id: String::from("office"),
            name: String::from("Office District"),
            description: String::from(
                "Collaborative workspaces with AI productivity enhancement.",
            ),
            position: [50.0, 0.0, 0.0],
            color: String::from("hsl(200, 100%, 60%)"),
            icon: String::from("\u{1f3e2}"),
            available: true,
            population: 247,
            activities: vec![
                Activity {
                    id: String::from("meeting"),
                    name: String::from("Team Sync"),
                    description: String::from(
                        "Virtual collaboration session with global team members.",
                    ),
                    activity_type: ActivityType::Work,
                    duration_minutes: 60,
                    capacity: 8,
                    current_participants: 3,
                    starts_at: Some(now.saturating_add(MEETING_OFFSET)),
                },
                Activity {
                    id: String::from("focus"),
                    name: String::from("Deep Work Session"),
                    description: String::from(
                        "Noise-cancelling environment for concentrated work.",
                    ),
                    activity_type: ActivityType::Work,
                    duration_minutes: 120,
                    capacity: 50,
                    current_participants: 12,
                    starts_at: None,
                },
            ],
        },
        District {
            id: String::from("social"),
            name: String::from("Social Hub"),
            description: String::from(
                "Community spaces for connection, learning, and entertainment.",
            ),
            position: [0.0, 0.0, 50.0],
            color: String::from("hsl(270, 80%, 60%)"),
            icon: String::from("\u{1f3ad}"),
            available: true,
            population: 892,
            activities: vec![
                Activity {
                    id: String::from("meditation"),
                    name: String::from("Group Meditation"),
                    description: String::from(
                        "Guided mindfulness session in virtual nature environments.",
                    ),
                    activity_type: ActivityType::Health,
                    duration_minutes: 20,
                    capacity: 100,
                    current_participants: 23,
                    starts_at: Some(now.saturating_add(MEDITATION_OFFSET)),
                },
                Activity {
                    id: String::from("concert"),
                    name: String::from("Virtual Concert"),
                    description: String::from(
                        "Live performance by AI-human collaborative musicians.",
                    ),
                    activity_type: ActivityType::Entertainment,
                    duration_minutes: 90,
                    capacity: 5000,
                    current_participants: 1247,
                    starts_at: Some(now.saturating_add(CONCERT_OFFSET)),
                },
            ],
        },
        District {
            id: String::from("clinic"),
            name: String::from("Health Clinic"),
            description: String::from(
                "Advanced health monitoring and preventive care facilities.",
            ),
            position: [-50.0, 0.0, 0.0],
            color: String::from("hsl(0, 100%, 60%)"),
            icon: String::from("\u{1f3e5}"),
            available: true,
            population: 156,
            activities: vec![
                Activity {
                    id: String::from("checkup"),
                    name: String::from("Health Assessment"),
                    description: String::from(
                        "Comprehensive biometric analysis and wellness planning.",
                    ),
                    activity_type: ActivityType::Health,
                    duration_minutes: 30,
                    capacity: 20,
                    current_participants: 8,
                    starts_at: None,
                },
                Activity {
                    id: String::from("consultation"),
                    name: String::from("AI Health Advisor"),
                    description: String::from(
                        "Personalized health guidance based on your digital twin data.",
                    ),
                    activity_type: ActivityType::Health,
                    duration_minutes: 15,
                    capacity: 1,
                    current_participants: 0,
                    starts_at: None,
                },
            ],
        },
    ]
}
