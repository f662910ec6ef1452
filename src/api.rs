use dioxus::prelude::*;

use crate::fleet::contact::ContactForm;
use crate::fleet::refresher::LeaseId;
use crate::fleet::view::{Notification, VehicleCard};
use crate::shared::types::{ContactOutcomeDto, FleetViewDto, RefresherStatusDto};

/// Registers the caller as a viewer of `path`. A lease means the page gets
/// live updates; it must be renewed with [`renew_fleet_view`] and should be
/// handed back with [`release_fleet_view`].
#[server(AcquireFleetView)]
pub async fn acquire_fleet_view(path: String) -> Result<Option<LeaseId>, ServerFnError> {
    #[cfg(feature = "server")]
    {
        use dioxus::logger::tracing::warn;

        let Some(app) = crate::backend::context::app() else {
            warn!("acquire_fleet_view: app context not installed");
            return Ok(None);
        };
        Ok(app.refresher.acquire(&path).await)
    }
    #[cfg(not(feature = "server"))]
    {
        let _ = path;
        Ok(None)
    }
}

/// `false` once the lease has lapsed; the page then acquires a new one.
#[server(RenewFleetView)]
pub async fn renew_fleet_view(lease: LeaseId) -> Result<bool, ServerFnError> {
    #[cfg(feature = "server")]
    {
        if let Some(app) = crate::backend::context::app() {
            return Ok(app.refresher.renew(lease).await);
        }
    }
    #[cfg(not(feature = "server"))]
    let _ = lease;
    Ok(false)
}

#[server(ReleaseFleetView)]
pub async fn release_fleet_view(lease: LeaseId) -> Result<(), ServerFnError> {
    #[cfg(feature = "server")]
    {
        if let Some(app) = crate::backend::context::app() {
            app.refresher.release(lease).await;
        }
    }
    #[cfg(not(feature = "server"))]
    let _ = lease;
    Ok(())
}

#[server(GetFleetView)]
pub async fn fleet_view() -> Result<FleetViewDto, ServerFnError> {
    #[cfg(feature = "server")]
    {
        if let Some(app) = crate::backend::context::app() {
            return Ok(FleetViewDto {
                fleet: app.view.fleet().await,
                notifications: app.view.notifications().await,
                refresh_interval_secs: app.refresher.policy().interval.as_secs(),
            });
        }
        dioxus::logger::tracing::warn!("fleet_view: app context not installed");
    }
    Ok(FleetViewDto {
        fleet: None,
        notifications: vec![],
        refresh_interval_secs: crate::fleet::refresher::DEFAULT_REFRESH_INTERVAL.as_secs(),
    })
}

/// User-triggered refresh. The notice, if any, is meant for the caller only.
#[server(RefreshFleetNow)]
pub async fn refresh_fleet_now() -> Result<Option<Notification>, ServerFnError> {
    #[cfg(feature = "server")]
    {
        if let Some(app) = crate::backend::context::app() {
            return Ok(app.view.refresh_for_user(&app.refresher).await);
        }
    }
    Ok(None)
}

/// One vehicle by id. Served from the last render when there is one,
/// otherwise read straight from the source without touching the shared view.
#[server(GetVehicle)]
pub async fn vehicle_detail(id: i64) -> Result<Option<VehicleCard>, ServerFnError> {
    #[cfg(feature = "server")]
    {
        use crate::fleet::view::RenderedFleet;
        use dioxus::logger::tracing::error;

        let Some(app) = crate::backend::context::app() else {
            return Err(ServerFnError::new("app context not installed"));
        };
        let fleet = match app.view.fleet().await {
            Some(fleet) => fleet,
            None => {
                let timeout = app.refresher.policy().fetch_timeout;
                let fetch = tokio::time::timeout(timeout, app.source.fetch_snapshot());
                let snapshot = match fetch.await {
                    Ok(Ok(snapshot)) => snapshot,
                    Ok(Err(e)) => {
                        error!("vehicle_detail: fetch from {} failed: {e}", app.source.name());
                        return Err(ServerFnError::new(e.to_string()));
                    }
                    Err(_elapsed) => {
                        error!("vehicle_detail: fetch timed out after {:?}", timeout);
                        return Err(ServerFnError::new("fleet query timed out"));
                    }
                };
                RenderedFleet::from(&snapshot)
            }
        };
        return Ok(fleet.card(id).cloned());
    }
    #[cfg(not(feature = "server"))]
    {
        let _ = id;
        Ok(None)
    }
}

#[server(GetRefresherStatus)]
pub async fn refresher_status() -> Result<RefresherStatusDto, ServerFnError> {
    #[cfg(feature = "server")]
    {
        if let Some(app) = crate::backend::context::app() {
            let st = app.refresher.status().await;
            return Ok(RefresherStatusDto {
                running: st.running,
                source: app.source.name().to_string(),
                viewers: st.viewers,
                ticks: st.ticks,
                last_tick_at: st.last_tick_at.map(|t| t.to_rfc3339()),
                last_success_at: st.last_success_at.map(|t| t.to_rfc3339()),
                last_error: st.last_error,
                next_tick_at: st.next_tick_at.map(|t| t.to_rfc3339()),
            });
        }
    }
    Ok(RefresherStatusDto {
        running: false,
        source: String::new(),
        viewers: 0,
        ticks: 0,
        last_tick_at: None,
        last_success_at: None,
        last_error: Some("not started".into()),
        next_tick_at: None,
    })
}

#[server(SubmitContact)]
pub async fn submit_contact(form: ContactForm) -> Result<ContactOutcomeDto, ServerFnError> {
    #[cfg(feature = "server")]
    {
        use crate::fleet::contact::{ContactError, CONTACT_SUCCESS_MESSAGE};
        use dioxus::logger::tracing::error;
        use std::time::Duration;

        let Some(app) = crate::backend::context::app() else {
            error!("submit_contact: app context not installed");
            return Ok(ContactOutcomeDto {
                ok: false,
                message: ContactError::Delivery("no context".into()).to_string(),
            });
        };
        let deadline = Duration::from_secs(30);
        let result = match tokio::time::timeout(deadline, app.contact.submit(&form)).await {
            Ok(result) => result,
            Err(_elapsed) => Err(ContactError::Delivery("timed out".into())),
        };
        return Ok(match result {
            Ok(()) => ContactOutcomeDto {
                ok: true,
                message: CONTACT_SUCCESS_MESSAGE.to_string(),
            },
            Err(e) => {
                if let ContactError::Delivery(detail) = &e {
                    error!("submit_contact: delivery failed: {detail}");
                }
                ContactOutcomeDto {
                    ok: false,
                    message: e.to_string(),
                }
            }
        });
    }
    #[cfg(not(feature = "server"))]
    {
        let _ = form;
        Ok(ContactOutcomeDto {
            ok: false,
            message: "Failed to send message. Please try again.".into(),
        })
    }
}
