//! Plan command implementation for the Agrilogix CLI.

use agrilogix_core::{
    Assignment, AssignmentEngine, AssignmentMode, CostModel, DisplayPolyline, Facility,
    FacilityLoad, HaversineProvider, Location, LogisticsCost, NearestFacility, NearestProducer,
    Producer, Route, RoutePlanner, RouteRequest, ShipmentPlan, ShipmentPlanner, ShipmentQuote,
    ShipmentRequest, TariffConfig, VehicleTier, facility_loads, interpolate_polyline,
    nearest_facility, nearest_producers,
};
use agrilogix_fs::open_utf8_file;
use agrilogix_pathfinder::{AStarPlanner, AStarPlannerConfig, DEFAULT_MAX_WAYPOINTS};
use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::io::{BufReader, Write};

use crate::{
    ARG_PLAN_MAX_WAYPOINTS, ARG_PLAN_REQUEST, ARG_PLAN_TARIFF, CliError, ENV_PLAN_REQUEST,
    RequestError,
};

/// CLI arguments for the `plan` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Run one logistics operation described by a JSON request \
                 file. The file carries the producer and facility snapshot \
                 and an \"operation\" tag selecting nearest_facility, \
                 nearest_producers, assign, route, cost, shipment or \
                 polyline.",
    about = "Plan a shipment, route or assignment from a JSON snapshot"
)]
#[ortho_config(prefix = "AGRILOGIX")]
pub(crate) struct PlanArgs {
    /// Path to a JSON file containing a plan request.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// Path to a JSON tariff overriding the reference rates.
    #[arg(long = ARG_PLAN_TARIFF, value_name = "path")]
    #[serde(default)]
    pub(crate) tariff: Option<Utf8PathBuf>,
    /// Largest number of waypoints admitted to route searches.
    #[arg(long = ARG_PLAN_MAX_WAYPOINTS, value_name = "count")]
    #[serde(default)]
    pub(crate) max_waypoints: Option<usize>,
}

impl PlanArgs {
    pub(crate) fn into_config(self) -> Result<PlanConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        PlanConfig::try_from(merged)
    }
}

/// Resolved `plan` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PlanConfig {
    /// Path to the JSON request file.
    pub(crate) request_path: Utf8PathBuf,
    /// Optional path to a JSON tariff.
    pub(crate) tariff_path: Option<Utf8PathBuf>,
    /// Waypoint cap handed to the route planner.
    pub(crate) max_waypoints: usize,
}

impl PlanConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        Self::require_existing(&self.request_path, ARG_PLAN_REQUEST)?;
        if let Some(tariff) = &self.tariff_path {
            Self::require_existing(tariff, ARG_PLAN_TARIFF)?;
        }
        Ok(())
    }

    fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
        match agrilogix_fs::file_is_file(path) {
            Ok(true) => Ok(()),
            Ok(false) if path.exists() => Err(CliError::SourcePathNotFile {
                field,
                path: path.to_path_buf(),
            }),
            Ok(false) => Err(CliError::MissingSourceFile {
                field,
                path: path.to_path_buf(),
            }),
            Err(source) => Err(CliError::InspectSourcePath {
                field,
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

impl TryFrom<PlanArgs> for PlanConfig {
    type Error = CliError;

    fn try_from(args: PlanArgs) -> Result<Self, Self::Error> {
        let request_path = args.request_path.ok_or(CliError::MissingArgument {
            field: ARG_PLAN_REQUEST,
            env: ENV_PLAN_REQUEST,
        })?;
        Ok(Self {
            request_path,
            tariff_path: args.tariff,
            max_waypoints: args.max_waypoints.unwrap_or(DEFAULT_MAX_WAYPOINTS),
        })
    }
}

/// A single operation decoded from the request file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "operation", rename_all = "snake_case")]
pub(crate) enum PlanRequest {
    /// Closest facility to a point.
    NearestFacility {
        point: Location,
        facilities: Vec<Facility>,
    },
    /// Up to `limit` producers closest to a point.
    NearestProducers {
        point: Location,
        producers: Vec<Producer>,
        limit: usize,
    },
    /// One assignment per producer, plus projected facility loads.
    Assign {
        producers: Vec<Producer>,
        facilities: Vec<Facility>,
        #[serde(default)]
        mode: AssignmentMode,
    },
    /// A* route between two points.
    Route(RouteRequest),
    /// Transport cost for a one-way distance.
    Cost {
        distance_km: f64,
        quantity: f64,
        #[serde(default)]
        tier: Option<VehicleTier>,
        #[serde(default)]
        price_per_unit: Option<f64>,
    },
    /// Nearest facility, route and cost in one step.
    Shipment(ShipmentRequest),
    /// Straight-line points for drawing, never costed.
    Polyline {
        start: Location,
        end: Location,
        points: u32,
    },
}

/// Result of a [`PlanRequest`], tagged with the same operation name.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "operation", rename_all = "snake_case")]
pub(crate) enum PlanResponse {
    NearestFacility {
        facility: Option<NearestFacility>,
    },
    NearestProducers {
        producers: Vec<NearestProducer>,
    },
    Assign {
        assignments: Vec<Assignment>,
        loads: Vec<FacilityLoad>,
    },
    Route {
        route: Route,
    },
    Cost {
        cost: LogisticsCost,
        quote: Option<ShipmentQuote>,
    },
    Shipment {
        plan: Option<ShipmentPlan>,
    },
    Polyline {
        polyline: DisplayPolyline,
    },
}

impl PlanRequest {
    /// Reject malformed coordinates and non-finite amounts before dispatch.
    pub(crate) fn validate(&self) -> Result<(), RequestError> {
        match self {
            Self::NearestFacility { point, facilities } => {
                validate_location("point", *point)?;
                validate_facilities(facilities)
            }
            Self::NearestProducers {
                point, producers, ..
            } => {
                validate_location("point", *point)?;
                validate_producers(producers)
            }
            Self::Assign {
                producers,
                facilities,
                ..
            } => {
                validate_producers(producers)?;
                validate_facilities(facilities)
            }
            Self::Route(request) => validate_route(request),
            Self::Cost {
                distance_km,
                quantity,
                price_per_unit,
                ..
            } => {
                validate_finite("distance_km", *distance_km)?;
                validate_finite("quantity", *quantity)?;
                if let Some(price) = price_per_unit {
                    validate_finite("price_per_unit", *price)?;
                }
                Ok(())
            }
            Self::Shipment(request) => {
                validate_location("origin", request.origin)?;
                validate_finite("quantity", request.quantity)?;
                validate_facilities(&request.facilities)?;
                for waypoint in &request.waypoints {
                    validate_location("waypoints", *waypoint)?;
                }
                if let Some(price) = request.price_per_unit {
                    validate_finite("price_per_unit", price)?;
                }
                RouteRequest {
                    max_leg_km: request.max_leg_km,
                    ..RouteRequest::direct(request.origin, request.origin)
                }
                .validate()?;
                Ok(())
            }
            Self::Polyline { start, end, .. } => {
                validate_location("start", *start)?;
                validate_location("end", *end)
            }
        }
    }
}

fn validate_location(field: &'static str, location: Location) -> Result<(), RequestError> {
    location
        .validate()
        .map_err(|source| RequestError::Location { field, source })
}

// Non-positive amounts are degenerate inputs that cost nothing, not errors.
fn validate_finite(field: &'static str, value: f64) -> Result<(), RequestError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(RequestError::InvalidNumber { field, value })
    }
}

fn validate_facilities(facilities: &[Facility]) -> Result<(), RequestError> {
    facilities.iter().try_for_each(Facility::validate)?;
    Ok(())
}

fn validate_producers(producers: &[Producer]) -> Result<(), RequestError> {
    producers.iter().try_for_each(Producer::validate)?;
    Ok(())
}

fn validate_route(request: &RouteRequest) -> Result<(), RequestError> {
    validate_location("start", request.start)?;
    validate_location("end", request.end)?;
    for waypoint in &request.waypoints {
        validate_location("waypoints", *waypoint)?;
    }
    request.validate()?;
    Ok(())
}

/// Collaborators shared by every operation in one invocation.
struct PlanContext {
    cost_model: CostModel,
    planner: AStarPlanner<HaversineProvider>,
}

impl PlanContext {
    fn new(cost_model: CostModel, max_waypoints: usize) -> Self {
        Self {
            cost_model,
            planner: AStarPlanner::with_config(
                HaversineProvider,
                AStarPlannerConfig { max_waypoints },
            ),
        }
    }

    fn execute(&self, request: PlanRequest) -> Result<PlanResponse, CliError> {
        let response = match request {
            PlanRequest::NearestFacility { point, facilities } => PlanResponse::NearestFacility {
                facility: nearest_facility(point, &facilities),
            },
            PlanRequest::NearestProducers {
                point,
                producers,
                limit,
            } => PlanResponse::NearestProducers {
                producers: nearest_producers(point, &producers, limit),
            },
            PlanRequest::Assign {
                producers,
                facilities,
                mode,
            } => {
                let assignments = AssignmentEngine::new(mode).assign(&producers, &facilities);
                let loads = facility_loads(&assignments, &producers, &facilities);
                PlanResponse::Assign { assignments, loads }
            }
            PlanRequest::Route(request) => PlanResponse::Route {
                route: self
                    .planner
                    .plan(&request)
                    .map_err(|source| CliError::Plan { source })?,
            },
            PlanRequest::Cost {
                distance_km,
                quantity,
                tier,
                price_per_unit,
            } => {
                let cost = match tier {
                    Some(tier) if quantity > 0.0 => {
                        self.cost_model.estimate_for_tier(tier, distance_km)
                    }
                    _ => self.cost_model.estimate(distance_km, quantity),
                };
                let quote = price_per_unit.map(|price| {
                    with_transport(self.cost_model.quote(distance_km, quantity, price), cost)
                });
                PlanResponse::Cost { cost, quote }
            }
            PlanRequest::Shipment(request) => {
                let shipments = ShipmentPlanner::new(&self.planner, self.cost_model);
                PlanResponse::Shipment {
                    plan: shipments
                        .plan(&request)
                        .map_err(|source| CliError::Plan { source })?,
                }
            }
            PlanRequest::Polyline { start, end, points } => PlanResponse::Polyline {
                polyline: interpolate_polyline(start, end, points),
            },
        };
        Ok(response)
    }
}

/// Re-price a quote against the transport actually chosen.
#[expect(
    clippy::float_arithmetic,
    reason = "grand total sums product and transport cost"
)]
fn with_transport(quote: ShipmentQuote, transport: LogisticsCost) -> ShipmentQuote {
    ShipmentQuote {
        transport,
        grand_total: quote.product_cost + transport.total_cost,
        ..quote
    }
}

pub(crate) fn run_plan(args: PlanArgs) -> Result<(), CliError> {
    let config = resolve_plan_config(args)?;
    let mut stdout = std::io::stdout().lock();
    run_plan_with(&config, &mut stdout)
}

/// Load, validate and run the request named by `config`, writing JSON to
/// `writer`.
pub(crate) fn run_plan_with(config: &PlanConfig, writer: &mut dyn Write) -> Result<(), CliError> {
    let response = execute_plan(config)?;
    write_plan_response(writer, &response)
}

fn execute_plan(config: &PlanConfig) -> Result<PlanResponse, CliError> {
    let cost_model = match &config.tariff_path {
        Some(path) => load_cost_model(path)?,
        None => CostModel::default(),
    };
    let request = load_plan_request(&config.request_path)?;
    request
        .validate()
        .map_err(|source| CliError::InvalidRequest {
            path: config.request_path.clone(),
            source,
        })?;
    PlanContext::new(cost_model, config.max_waypoints).execute(request)
}

fn resolve_plan_config(args: PlanArgs) -> Result<PlanConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

/// Loads a JSON-encoded [`PlanRequest`] from disk.
pub(crate) fn load_plan_request(path: &Utf8Path) -> Result<PlanRequest, CliError> {
    load_json(path, ARG_PLAN_REQUEST)
}

/// Loads and validates a JSON tariff.
pub(crate) fn load_cost_model(path: &Utf8Path) -> Result<CostModel, CliError> {
    let tariff: TariffConfig = load_json(path, ARG_PLAN_TARIFF)?;
    CostModel::new(tariff).map_err(|source| CliError::InvalidTariff {
        path: path.to_path_buf(),
        source,
    })
}

fn load_json<T: DeserializeOwned>(path: &Utf8Path, field: &'static str) -> Result<T, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenInput {
        field,
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|source| CliError::ParseInput {
        field,
        path: path.to_path_buf(),
        source,
    })
}

fn write_plan_response(writer: &mut dyn Write, response: &PlanResponse) -> Result<(), CliError> {
    let payload =
        serde_json::to_string_pretty(response).map_err(CliError::SerialisePlanResponse)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WritePlanOutput)?;
    writer
        .write_all(b"\n")
        .map_err(CliError::WritePlanOutput)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<PlanConfig, CliError> {
    let merged = PlanArgs::merge_from_layers(layers).map_err(CliError::from)?;
    PlanConfig::try_from(merged)
}
