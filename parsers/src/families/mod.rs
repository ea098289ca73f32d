mod adsc;
mod atis;
mod catchall;
mod cpdlc;
mod eta;
mod flight_plan;
mod gate;
mod landing;
mod loadsheet;
mod media;
mod oceanic;
mod pdc;
mod position;
mod turbulence;
mod waypoint;
mod weather;
mod wind;

use crate::Parser;

/// Every parser this system ships, in no particular order — the registry is
/// what imposes an order, via each parser's own declared priority.
///
pub fn all() -> Vec<Box<dyn Parser>> {
    let mut v: Vec<Box<dyn Parser>> = vec![Box::new(pdc::PdcParser)];
    v.extend(position::all());
    v.push(Box::new(flight_plan::FlightPlanParser));
    v.push(Box::new(oceanic::OceanicClearanceParser));
    v.push(Box::new(wind::WindForecastH1Parser));
    v.push(Box::new(wind::WindForecastH2Parser));
    v.push(Box::new(adsc::AdscParser));
    v.push(Box::new(cpdlc::CpdlcConnectParser));
    v.push(Box::new(cpdlc::CpdlcParser));
    v.push(Box::new(loadsheet::LoadsheetParser));
    v.push(Box::new(eta::EtaParser));
    v.push(Box::new(turbulence::TurbulenceParser));
    v.push(Box::new(weather::WeatherParser));
    v.push(Box::new(atis::AtisParser));
    v.push(Box::new(landing::LandingDataParser));
    v.push(Box::new(gate::GateAssignmentParser));
    v.push(Box::new(media::MediaAdvisoryParser));
    v.push(Box::new(waypoint::WaypointPositionParser));
    v.push(Box::new(catchall::GenericKeywordParser));
    v
}
