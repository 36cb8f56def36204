//! Text sent to the chat backend: the controller's system brief and the
//! per-turn situational update.

use chrono::NaiveDate;

use aiatc_domain::{
    radio_address, relative_position, AirportCode, ControllerPersona, FlightSnapshot,
    PilotIdentity, Position, TOWER_CEILING_FT,
};

/// Inputs for a controller's system brief.
pub struct IntroFacts<'a> {
    pub controller: &'a ControllerPersona,
    /// "Name (CODE)" or the bare code.
    pub airport_name: &'a str,
    pub airport_position: Position,
    pub pilot: &'a PilotIdentity,
    pub date: NaiveDate,
    pub snapshot: &'a FlightSnapshot,
}

/// Written once per airport, when the first transmission creates its context.
pub fn intro_message(facts: &IntroFacts<'_>) -> String {
    let controller = facts.controller;
    let snapshot = facts.snapshot;
    format!(
        "You are {name}, a {age} years old {gender} ATC controller on the {airport} for today. \
         Your airport location is ({position}). \
         You are talking to pilot whose name is {pilot} callsign ({callsign}) and they've been piloting since {licensed}. \
         You will be acting as ground, tower (if the plane is below or at {ceiling} ft) or approach or departure (if above {ceiling} ft), \
         depending on whether the plane is on the ground, their distance from the airport, heading and previous context. \
         If the aircraft is in the air, keep your communication short and concise, as a real ATC. \
         If they're on the ground, your replies should still be short (1-2 sentence per reply), but you can use a more relaxed \
         communication like making jokes, discussing weather, other traffic etc. \
         If asked why so slow on replies, say you're busy, like the real ATC. \
         Today is {date}, time is {time}, a beautiful {season} {daylight}",
        name = controller.full_name(),
        age = controller.age,
        gender = controller.gender,
        airport = facts.airport_name,
        position = facts.airport_position,
        pilot = facts.pilot.name,
        callsign = facts.pilot.callsign,
        licensed = facts.pilot.licensed_since.format("%Y-%m-%d"),
        ceiling = TOWER_CEILING_FT,
        date = facts.date.format("%Y-%m-%d"),
        time = snapshot.time,
        season = snapshot.season,
        daylight = snapshot.daylight_description(),
    )
}

/// Fresh description of the aircraft for the turn being started.
pub fn situational_update(
    airport: &AirportCode,
    airport_position: Position,
    callsign: &str,
    date: NaiveDate,
    snapshot: &FlightSnapshot,
) -> String {
    format!(
        "Date and time: {date} {time}. \
         The pilot is flying {aircraft} and their position is {ground} {relative}. \
         The altitude of the aircraft is {msl:.0} feet above the sea level ({agl:.0} feet above ground). \
         The plane is {speed}. Wind speed is {wind}. Air temperature is {temp} degrees celsius. \
         You should address them with \"{address}\", followed by the message.",
        date = date.format("%Y-%m-%d"),
        time = snapshot.time,
        aircraft = snapshot.aircraft_name,
        ground = snapshot.ground_state(),
        relative = relative_position(airport_position, snapshot),
        msl = snapshot.altitude_ft.floor(),
        agl = snapshot.altitude_above_ground_ft().floor(),
        speed = snapshot.speed_description(),
        wind = snapshot.wind_description(),
        temp = snapshot.air_temp_c,
        address = radio_address(callsign, airport, snapshot),
    )
}
