//! [`HrmsApi`] over HTTP using [`reqwest`].

use anyhow::{Context, bail};
use async_trait::async_trait;
use reqwest::{Method, Response, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::{ApiError, HrmsApi};
use crate::model::{AttendanceRecord, Employee, NewAttendance, NewEmployee, PresentDays};

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// `base_url` is the service root, e.g. `http://localhost:8000`.
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let base_url = Url::parse(base_url)
            .with_context(|| format!("invalid HRMS API base URL: {base_url}"))?;
        if base_url.cannot_be_a_base() {
            bail!("HRMS API base URL cannot carry a path: {base_url}");
        }
        Ok(Self {
            client: reqwest::Client::new(),
            base_url,
        })
    }

    /// Appends percent-encoded segments to the base URL path.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<&B>,
    ) -> Result<Response, ApiError> {
        let url = self.endpoint(segments);
        debug!(%method, %url, "Calling HRMS API");

        let mut request = self.client.request(method.clone(), url.clone());
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            warn!(error = %e, %method, %url, "HRMS API unreachable");
            ApiError::from(e)
        })?;

        Self::ensure_success(response).await
    }

    async fn fetch<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, ApiError> {
        let response = self.send::<()>(Method::GET, segments, None).await?;
        Ok(response.json::<T>().await?)
    }

    async fn ensure_success(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        debug!(status = status.as_u16(), body = %body, "HRMS API rejected request");
        Err(ApiError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl HrmsApi for ApiClient {
    async fn create_employee(&self, employee: &NewEmployee) -> Result<Employee, ApiError> {
        let response = self
            .send(Method::POST, &["api", "employees"], Some(employee))
            .await?;
        Ok(response.json().await?)
    }

    async fn list_employees(&self) -> Result<Vec<Employee>, ApiError> {
        self.fetch(&["api", "employees"]).await
    }

    async fn get_employee(&self, employee_id: &str) -> Result<Employee, ApiError> {
        self.fetch(&["api", "employees", employee_id]).await
    }

    async fn delete_employee(&self, employee_id: &str) -> Result<(), ApiError> {
        self.send::<()>(Method::DELETE, &["api", "employees", employee_id], None)
            .await?;
        Ok(())
    }

    async fn create_attendance(
        &self,
        attendance: &NewAttendance,
    ) -> Result<AttendanceRecord, ApiError> {
        let response = self
            .send(Method::POST, &["api", "attendance"], Some(attendance))
            .await?;
        Ok(response.json().await?)
    }

    async fn list_attendance(&self) -> Result<Vec<AttendanceRecord>, ApiError> {
        self.fetch(&["api", "attendance"]).await
    }

    async fn list_employee_attendance(
        &self,
        employee_id: &str,
    ) -> Result<Vec<AttendanceRecord>, ApiError> {
        self.fetch(&["api", "attendance", employee_id]).await
    }

    async fn present_days(&self, employee_id: &str) -> Result<u32, ApiError> {
        let days: PresentDays = self
            .fetch(&["api", "attendance", employee_id, "present-days"])
            .await?;
        Ok(days.present_days)
    }
}
