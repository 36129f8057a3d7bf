#![allow(dead_code)]
//! C8: the core's four external entry points (spec §4.8, §6).

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::StationEngineConfig;
use crate::domain::curve::SlotCurve;
use crate::domain::fleet::{FleetConfig, StationConfig, WeeklySchedule};
use crate::domain::pile::PileCounts;
use crate::domain::tariff::{price_curve, TouPeriod};
use crate::domain::types::{Kw, Kwh, Yuan, YuanPerKwh};
use crate::economics::{project_economics, EconomicsInputs, YearlyEconomic};
use crate::errors::{CoreError, Warning};
use crate::repo::Repositories;
use crate::scheduler::weekly::compute_weekly;
use crate::sizing::{check_transformer_overflow, select_transformer, size_ess, ChargeMode, EssSizing};

/// Request body for the `/v1/load-curve` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct LoadCurveRequest {
    pub fleet: FleetConfig,
    pub schedule: WeeklySchedule,
    pub tous: Vec<TouPeriod>,
}

/// Shared load-curve payload returned by `computeLoadCurve` and embedded in
/// `computeV2G`'s result.
#[derive(Debug, Clone, Serialize)]
pub struct LoadCurveResult {
    pub days: Vec<(String, SlotCurve)>,
    pub envelope: SlotCurve,
    pub peak_power_kw: Kw,
    pub peak_discharge_power_kw: Kw,
    pub daily_max_energy_kwh: Kwh,
    pub max_daily_arbitrage: Yuan,
    pub weekly_arbitrage_sum: Yuan,
    pub steps: Vec<String>,
}

/// `computeLoadCurve(fleet, schedule, tous) -> LoadCurveResult` (spec §6.1).
pub fn compute_load_curve(
    fleet: &FleetConfig,
    schedule: &WeeklySchedule,
    tous: &[TouPeriod],
    config: &StationEngineConfig,
) -> Result<LoadCurveResult, CoreError> {
    if tous.is_empty() {
        return Err(CoreError::MissingInput("tou tariff".to_string()));
    }
    fleet.validate()?;

    let mut steps = Vec::new();
    steps.push("resolved 96-slot TOU price curve".to_string());
    let prices = price_curve(tous)?;

    steps.push("ran weekly aggregator (V1G/V2G per operating day)".to_string());
    let weekly = compute_weekly(fleet, schedule, &prices, &config.pile_power, config.v2g_discharge_derate);

    let days = weekly
        .days
        .iter()
        .map(|d| (d.weekday.to_string(), d.curve.clone()))
        .collect();

    Ok(LoadCurveResult {
        days,
        envelope: weekly.envelope,
        peak_power_kw: weekly.peak_power_kw,
        peak_discharge_power_kw: weekly.peak_discharge_power_kw,
        daily_max_energy_kwh: weekly.daily_max_energy_kwh,
        max_daily_arbitrage: weekly.max_daily_arbitrage,
        weekly_arbitrage_sum: weekly.weekly_arbitrage_sum,
        steps,
    })
}

#[derive(Debug, Clone, Deserialize)]
pub struct SizingRequest {
    pub station: StationConfig,
    pub fleet: FleetConfig,
    pub schedule: WeeklySchedule,
    pub tous: Vec<TouPeriod>,
    pub charge_mode: ChargeMode,
    /// Annual battery capacity decay, as a percent (e.g. 2 for 2%/year).
    /// Not one of spec.md's process-wide "Configurable constants" — it is a
    /// per-request economic assumption, supplied alongside the sizing
    /// request (see scenario seed 6).
    pub annual_decay_percent: Decimal,
    pub enable_peak_shaving: bool,
    pub peak_shaving_subsidy: YuanPerKwh,
}

#[derive(Debug, Clone, Serialize)]
pub struct SizingResult {
    pub transformer_kva: Kw,
    pub ess: EssSizing,
    pub economics: Vec<YearlyEconomic>,
    pub warnings: Vec<Warning>,
    pub steps: Vec<String>,
}

/// `computeSizing(station, fleet, schedule, tous, request) -> SizingResult`:
/// runs the V1G-only weekly aggregator, then C6 -> C7 (spec §4.8).
pub fn compute_sizing(
    request: &SizingRequest,
    config: &StationEngineConfig,
) -> Result<SizingResult, CoreError> {
    if request.tous.is_empty() {
        return Err(CoreError::MissingInput("tou tariff".to_string()));
    }
    request.fleet.validate()?;

    let mut steps = Vec::new();
    let mut warnings = Vec::new();

    let prices = price_curve(&request.tous)?;

    let mut v1g_only_fleet = request.fleet;
    v1g_only_fleet.v2g_piles = PileCounts::default();
    let weekly = compute_weekly(
        &v1g_only_fleet,
        &request.schedule,
        &prices,
        &config.pile_power,
        config.v2g_discharge_derate,
    );
    steps.push("computed V1G-only weekly load curve for sizing".to_string());

    let table = config.table_for(request.station.country);

    let transformer_kva = select_transformer(weekly.peak_power_kw, request.station.transformer_kva, table);
    steps.push(format!("selected transformer rated {transformer_kva} kVA"));

    let ess = size_ess(
        weekly.peak_power_kw,
        request.station.pv_peak_power_kw,
        config.empirical_coefficient,
        request.charge_mode,
        table,
    );
    steps.push(format!(
        "sized ESS to {} units of the {}kW/{}kWh module",
        ess.units, ess.model_power_kw, ess.model_capacity_kwh
    ));

    if let Some(warning) = check_transformer_overflow(ess.rated_power_kw, transformer_kva) {
        steps.push("ESS rated power exceeds transformer capacity".to_string());
        warnings.push(warning);
    }

    let price_values: Vec<Decimal> = prices.iter().map(|p| p.value()).collect();
    let max_price = price_values.iter().copied().max().unwrap_or(Decimal::ZERO);
    let min_price = price_values.iter().copied().min().unwrap_or(Decimal::ZERO);
    let price_spread = YuanPerKwh::new(max_price - min_price);

    steps.push("projected 20-year economics".to_string());
    let economics = project_economics(&EconomicsInputs {
        capacity_kwh: ess.capacity_kwh.value(),
        annual_decay_percent: request.annual_decay_percent,
        mode: request.charge_mode,
        price_spread,
        enable_peak_shaving: request.enable_peak_shaving,
        peak_shaving_subsidy: request.peak_shaving_subsidy,
        ess_unit_cost_yuan_per_kwh: config.ess_unit_cost_yuan_per_kwh,
        om_ratio: config.om_ratio,
        om_inflation_per_year: config.om_inflation_per_year,
    });

    Ok(SizingResult {
        transformer_kva,
        ess,
        economics,
        warnings,
        steps,
    })
}

#[derive(Debug, Clone, Deserialize)]
pub struct V2gRequest {
    pub fleet: FleetConfig,
    pub schedule: WeeklySchedule,
    pub tous: Vec<TouPeriod>,
    pub discharge_derate_override: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize)]
pub struct V2gResult {
    pub load_curve: LoadCurveResult,
    pub pile_suggestion: PileCounts,
}

fn ceil_to_u32(value: Decimal) -> u32 {
    value.ceil().to_u64().unwrap_or(0) as u32
}

/// `computeV2G(request) -> V2GResult` (spec §4.8, §6.3).
pub fn compute_v2g(request: &V2gRequest, config: &StationEngineConfig) -> Result<V2gResult, CoreError> {
    if request.tous.is_empty() {
        return Err(CoreError::MissingInput("tou tariff".to_string()));
    }
    request.fleet.validate()?;

    let derate = request.discharge_derate_override.unwrap_or(config.v2g_discharge_derate);

    let mut steps = Vec::new();
    steps.push("resolved 96-slot TOU price curve".to_string());
    let prices = price_curve(&request.tous)?;

    steps.push("ran weekly aggregator in V2G mode".to_string());
    let weekly = compute_weekly(&request.fleet, &request.schedule, &prices, &config.pile_power, derate);

    let vehicles = Decimal::from(request.fleet.vehicle_count);
    let ratios = &config.pile_suggestion_ratios;
    let pile_suggestion = PileCounts {
        fast: ceil_to_u32(vehicles * ratios.fast),
        slow: ceil_to_u32(vehicles * ratios.slow),
        ultra_fast: ceil_to_u32(vehicles * ratios.ultra),
    };
    steps.push("derived pile-configuration suggestion from vehicle count".to_string());

    let days = weekly
        .days
        .iter()
        .map(|d| (d.weekday.to_string(), d.curve.clone()))
        .collect();

    Ok(V2gResult {
        load_curve: LoadCurveResult {
            days,
            envelope: weekly.envelope,
            peak_power_kw: weekly.peak_power_kw,
            peak_discharge_power_kw: weekly.peak_discharge_power_kw,
            daily_max_energy_kwh: weekly.daily_max_energy_kwh,
            max_daily_arbitrage: weekly.max_daily_arbitrage,
            weekly_arbitrage_sum: weekly.weekly_arbitrage_sum,
            steps,
        },
        pile_suggestion,
    })
}

/// `computeV2GForProject(projectId-bound inputs) -> V2GResult` (spec §6.4):
/// identical computation to `computeV2G`, with inputs loaded from the
/// project store rather than the request body.
pub async fn compute_v2g_for_project(
    project_id: uuid::Uuid,
    repo: &dyn Repositories,
    config: &StationEngineConfig,
) -> Result<V2gResult, CoreError> {
    let project = repo
        .get_project(project_id)
        .await
        .ok_or_else(|| CoreError::MissingInput(format!("no project with id {project_id}")))?;

    compute_v2g(
        &V2gRequest {
            fleet: project.fleet,
            schedule: project.schedule,
            tous: project.tous,
            discharge_derate_override: None,
        },
        config,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fleet::{CountryCode, TimeRange};
    use crate::domain::tariff::TouPeriodType;
    use crate::domain::time_grid::SlotRange;
    use crate::domain::types::Percent;
    use crate::repo::{InMemoryRepositories, Project};
    use rust_decimal_macros::dec;

    fn tous() -> Vec<TouPeriod> {
        vec![TouPeriod::new(
            TouPeriodType::Normal,
            vec![SlotRange::from_hhmm("00:00", "23:45").unwrap()],
            YuanPerKwh::new(dec!(0.5)),
        )]
    }

    fn fleet() -> FleetConfig {
        FleetConfig {
            vehicle_count: 1,
            battery_kwh: Kwh::new(dec!(100)),
            enable_time_control: true,
            piles: PileCounts { slow: 1, fast: 0, ultra_fast: 0 },
            v2g_piles: PileCounts::default(),
        }
    }

    fn schedule() -> WeeklySchedule {
        let day = crate::domain::fleet::DaySchedule::new(
            true,
            vec![TimeRange::from_hhmm("00:00", "23:45", Percent::new(dec!(80))).unwrap()],
        );
        WeeklySchedule::new(vec![day; 7])
    }

    #[test]
    fn compute_load_curve_rejects_missing_tariff() {
        let config = StationEngineConfig::default();
        let result = compute_load_curve(&fleet(), &schedule(), &[], &config);
        assert!(matches!(result, Err(CoreError::MissingInput(_))));
    }

    #[test]
    fn compute_load_curve_runs_end_to_end() {
        let config = StationEngineConfig::default();
        let result = compute_load_curve(&fleet(), &schedule(), &tous(), &config).unwrap();
        assert_eq!(result.days.len(), 7);
        assert!(!result.steps.is_empty());
    }

    #[test]
    fn compute_sizing_end_to_end_produces_twenty_years() {
        let config = StationEngineConfig::default();
        let request = SizingRequest {
            station: StationConfig {
                pv_peak_power_kw: Kw::zero(),
                transformer_kva: None,
                country: CountryCode::Cn,
            },
            fleet: fleet(),
            schedule: schedule(),
            tous: tous(),
            charge_mode: ChargeMode::One,
            annual_decay_percent: dec!(2),
            enable_peak_shaving: false,
            peak_shaving_subsidy: YuanPerKwh::zero(),
        };
        let result = compute_sizing(&request, &config).unwrap();
        assert_eq!(result.economics.len(), 20);
        assert!(result.ess.units >= 1);
    }

    #[tokio::test]
    async fn compute_v2g_for_project_loads_from_repository() {
        let config = StationEngineConfig::default();
        let repo = InMemoryRepositories::new();
        let id = uuid::Uuid::new_v4();
        repo.put_project(Project {
            id,
            station: StationConfig {
                pv_peak_power_kw: Kw::zero(),
                transformer_kva: None,
                country: CountryCode::Cn,
            },
            fleet: fleet(),
            schedule: schedule(),
            tous: tous(),
        })
        .await;

        let result = compute_v2g_for_project(id, &repo, &config).await.unwrap();
        assert_eq!(result.load_curve.days.len(), 7);
    }

    #[tokio::test]
    async fn compute_v2g_for_project_missing_is_missing_input() {
        let config = StationEngineConfig::default();
        let repo = InMemoryRepositories::new();
        let result = compute_v2g_for_project(uuid::Uuid::new_v4(), &repo, &config).await;
        assert!(matches!(result, Err(CoreError::MissingInput(_))));
    }
}
