// src/db/memory.rs
// DOCUMENTATION: In-memory implementation of every storage trait
// PURPOSE: Lets service tests run without PostgreSQL. Mirrors the schema's
// unique constraints and ON DELETE CASCADE rules.

use crate::db::*;
use crate::errors::WishlistError;
use crate::models::*;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
struct MemoryState {
    tick: i64,
    users: Vec<User>,
    continents: Vec<Continent>,
    countries: Vec<Country>,
    cities: Vec<City>,
    destinations: Vec<Destination>,
    photos: Vec<Photo>,
    activities: Vec<Activity>,
    suggestions: Vec<SuggestedActivity>,
}

impl MemoryState {
    /// Strictly increasing timestamps so creation order is observable
    fn next_timestamp(&mut self, base: DateTime<Utc>) -> DateTime<Utc> {
        self.tick += 1;
        base + Duration::seconds(self.tick)
    }

    fn city_detail(&self, city_id: Uuid) -> Option<CityDetail> {
        let city = self.cities.iter().find(|c| c.id == city_id)?;
        let country = self.countries.iter().find(|c| c.id == city.country_id).map(|country| {
            CountryWithContinent {
                id: country.id,
                name: country.name.clone(),
                code: country.code.clone(),
                image_url: country.image_url.clone(),
                continent: self
                    .continents
                    .iter()
                    .find(|c| c.id == country.continent_id)
                    .cloned(),
            }
        });

        Some(CityDetail {
            id: city.id,
            name: city.name.clone(),
            image_url: city.image_url.clone(),
            latitude: city.latitude,
            longitude: city.longitude,
            country,
        })
    }

    fn photos_of(&self, destination_id: Uuid) -> Vec<Photo> {
        let mut photos: Vec<Photo> = self
            .photos
            .iter()
            .filter(|p| p.destination_id == destination_id)
            .cloned()
            .collect();
        photos.sort_by(|a, b| {
            a.sort_order
                .cmp(&b.sort_order)
                .then_with(|| b.created_at.cmp(&a.created_at))
        });
        photos
    }

    fn activities_of(&self, destination_id: Uuid) -> Vec<Activity> {
        let mut activities: Vec<Activity> = self
            .activities
            .iter()
            .filter(|a| a.destination_id == destination_id)
            .cloned()
            .collect();
        activities.sort_by(|a, b| {
            a.sort_order
                .cmp(&b.sort_order)
                .then_with(|| b.created_at.cmp(&a.created_at))
        });
        activities
    }

    fn detail(&self, destination: &Destination) -> Option<DestinationDetail> {
        Some(DestinationDetail {
            destination: destination.clone(),
            city: self.city_detail(destination.city_id)?,
            photos: self.photos_of(destination.id),
            activities: self.activities_of(destination.id),
        })
    }

    fn owner_of(&self, destination_id: Uuid) -> Option<Uuid> {
        self.destinations
            .iter()
            .find(|d| d.id == destination_id)
            .map(|d| d.user_id)
    }
}

/// Small catalog shared by service tests
pub struct SampleGeography {
    pub asia: Continent,
    pub europe: Continent,
    pub japan: Country,
    pub france: Country,
    pub tokyo: City,
    pub kyoto: City,
    pub paris: City,
    /// City without coordinates
    pub lyon: City,
}

pub struct MemoryStore {
    base: DateTime<Utc>,
    state: RwLock<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            base: Utc::now(),
            state: RwLock::new(MemoryState::default()),
        }
    }

    pub async fn seed_sample(&self) -> SampleGeography {
        let asia = self.add_continent("Asia", "AS").await;
        let europe = self.add_continent("Europe", "EU").await;
        let japan = self.add_country("Japan", "JP", asia.id).await;
        let france = self.add_country("France", "FR", europe.id).await;
        let tokyo = self.add_city("Tokyo", japan.id, Some((35.6762, 139.6503))).await;
        let kyoto = self.add_city("Kyoto", japan.id, Some((35.0116, 135.7681))).await;
        let paris = self.add_city("Paris", france.id, Some((48.8566, 2.3522))).await;
        let lyon = self.add_city("Lyon", france.id, None).await;

        SampleGeography {
            asia,
            europe,
            japan,
            france,
            tokyo,
            kyoto,
            paris,
            lyon,
        }
    }

    pub async fn add_continent(&self, name: &str, code: &str) -> Continent {
        let continent = Continent {
            id: Uuid::new_v4(),
            name: name.to_string(),
            code: code.to_string(),
            image_url: None,
        };
        self.state.write().await.continents.push(continent.clone());
        continent
    }

    pub async fn add_country(&self, name: &str, code: &str, continent_id: Uuid) -> Country {
        let country = Country {
            id: Uuid::new_v4(),
            name: name.to_string(),
            code: code.to_string(),
            image_url: None,
            continent_id,
        };
        self.state.write().await.countries.push(country.clone());
        country
    }

    pub async fn add_city(&self, name: &str, country_id: Uuid, coords: Option<(f64, f64)>) -> City {
        let city = City {
            id: Uuid::new_v4(),
            name: name.to_string(),
            image_url: Some(format!("https://img.example/{}.jpg", name.to_lowercase())),
            latitude: coords.map(|(lat, _)| lat),
            longitude: coords.map(|(_, lon)| lon),
            country_id,
        };
        self.state.write().await.cities.push(city.clone());
        city
    }

    pub async fn add_user(&self, email: &str) -> User {
        let new_user = NewUser {
            email: email.to_string(),
            password_hash: "not-a-real-hash".to_string(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
        };
        UserStore::create(self, &new_user)
            .await
            .expect("seed user should be unique")
    }

    /// Drop a country row without touching its cities, to simulate a broken chain
    pub async fn remove_country(&self, country_id: Uuid) {
        self.state.write().await.countries.retain(|c| c.id != country_id);
    }

    pub async fn destination_count(&self, user_id: Uuid, city_id: Uuid) -> usize {
        self.state
            .read()
            .await
            .destinations
            .iter()
            .filter(|d| d.user_id == user_id && d.city_id == city_id)
            .count()
    }

    pub async fn photo_count(&self, destination_id: Uuid) -> usize {
        self.state
            .read()
            .await
            .photos
            .iter()
            .filter(|p| p.destination_id == destination_id)
            .count()
    }

    pub async fn activity_count(&self, destination_id: Uuid) -> usize {
        self.state
            .read()
            .await
            .activities
            .iter()
            .filter(|a| a.destination_id == destination_id)
            .count()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create(&self, user: &NewUser) -> Result<User, WishlistError> {
        let mut state = self.state.write().await;
        if state.users.iter().any(|u| u.email == user.email) {
            return Err(WishlistError::Conflict(format!(
                "Email {} is already registered",
                user.email
            )));
        }
        let now = state.next_timestamp(self.base);
        let created = User {
            id: Uuid::new_v4(),
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            profile_picture_url: None,
            created_at: now,
            updated_at: now,
        };
        state.users.push(created.clone());
        Ok(created)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, WishlistError> {
        let state = self.state.read().await;
        Ok(state.users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, WishlistError> {
        let state = self.state.read().await;
        Ok(state.users.iter().find(|u| u.id == id).cloned())
    }

    async fn update_profile(
        &self,
        id: Uuid,
        req: &UpdateProfileRequest,
    ) -> Result<Option<User>, WishlistError> {
        let mut state = self.state.write().await;
        let now = state.next_timestamp(self.base);
        let Some(user) = state.users.iter_mut().find(|u| u.id == id) else {
            return Ok(None);
        };
        if let Some(first) = &req.first_name {
            user.first_name = first.clone();
        }
        if let Some(last) = &req.last_name {
            user.last_name = last.clone();
        }
        if let Some(url) = &req.profile_picture_url {
            user.profile_picture_url = Some(url.clone());
        }
        user.updated_at = now;
        Ok(Some(user.clone()))
    }
}

#[async_trait]
impl GeographyStore for MemoryStore {
    async fn list_continents(&self) -> Result<Vec<Continent>, WishlistError> {
        let mut continents = self.state.read().await.continents.clone();
        continents.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(continents)
    }

    async fn list_countries(
        &self,
        continent_id: Option<Uuid>,
    ) -> Result<Vec<Country>, WishlistError> {
        let state = self.state.read().await;
        let mut countries: Vec<Country> = state
            .countries
            .iter()
            .filter(|c| continent_id.map_or(true, |id| c.continent_id == id))
            .cloned()
            .collect();
        countries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(countries)
    }

    async fn list_cities(
        &self,
        country_id: Option<Uuid>,
        search: Option<&str>,
    ) -> Result<Vec<City>, WishlistError> {
        let state = self.state.read().await;
        let needle = search.map(|s| s.trim().to_lowercase());
        let mut cities: Vec<City> = state
            .cities
            .iter()
            .filter(|c| country_id.map_or(true, |id| c.country_id == id))
            .filter(|c| {
                needle
                    .as_ref()
                    .map_or(true, |n| c.name.to_lowercase().contains(n.as_str()))
            })
            .cloned()
            .collect();
        cities.sort_by(|a, b| a.name.cmp(&b.name));
        cities.truncate(50);
        Ok(cities)
    }

    async fn find_city(&self, id: Uuid) -> Result<Option<City>, WishlistError> {
        let state = self.state.read().await;
        Ok(state.cities.iter().find(|c| c.id == id).cloned())
    }

    async fn find_city_detail(&self, id: Uuid) -> Result<Option<CityDetail>, WishlistError> {
        Ok(self.state.read().await.city_detail(id))
    }
}

#[async_trait]
impl DestinationStore for MemoryStore {
    async fn find_by_user_and_city(
        &self,
        user_id: Uuid,
        city_id: Uuid,
    ) -> Result<Option<Destination>, WishlistError> {
        let state = self.state.read().await;
        Ok(state
            .destinations
            .iter()
            .find(|d| d.user_id == user_id && d.city_id == city_id)
            .cloned())
    }

    async fn create(
        &self,
        user_id: Uuid,
        req: &CreateDestinationRequest,
    ) -> Result<Destination, WishlistError> {
        let mut state = self.state.write().await;
        if state
            .destinations
            .iter()
            .any(|d| d.user_id == user_id && d.city_id == req.city_id)
        {
            return Err(WishlistError::Conflict(
                "City is already in your destinations".to_string(),
            ));
        }
        if !state.cities.iter().any(|c| c.id == req.city_id) {
            return Err(WishlistError::DatabaseError(
                "foreign key violation: city_id".to_string(),
            ));
        }
        let now = state.next_timestamp(self.base);
        let destination = Destination {
            id: Uuid::new_v4(),
            user_id,
            city_id: req.city_id,
            notes: req.notes.clone(),
            visited: req.visited.unwrap_or(false),
            visited_date: req.visited_date,
            planned_date: req.planned_date,
            priority: req.priority.unwrap_or(0),
            created_at: now,
            updated_at: now,
        };
        state.destinations.push(destination.clone());
        Ok(destination)
    }

    async fn find_for_user(
        &self,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Destination>, WishlistError> {
        let state = self.state.read().await;
        Ok(state
            .destinations
            .iter()
            .find(|d| d.id == id && d.user_id == user_id)
            .cloned())
    }

    async fn find_detail(
        &self,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<DestinationDetail>, WishlistError> {
        let state = self.state.read().await;
        Ok(state
            .destinations
            .iter()
            .find(|d| d.id == id && d.user_id == user_id)
            .and_then(|d| state.detail(d)))
    }

    async fn list_details(
        &self,
        user_id: Uuid,
        filter: DestinationFilter,
    ) -> Result<Vec<DestinationDetail>, WishlistError> {
        let state = self.state.read().await;
        let mut details: Vec<DestinationDetail> = state
            .destinations
            .iter()
            .filter(|d| d.user_id == user_id)
            .filter_map(|d| state.detail(d))
            .filter(|detail| {
                let country = detail.city.country.as_ref();
                match filter {
                    DestinationFilter::All => true,
                    DestinationFilter::Country(id) => country.map_or(false, |c| c.id == id),
                    DestinationFilter::Continent(id) => country
                        .and_then(|c| c.continent.as_ref())
                        .map_or(false, |c| c.id == id),
                }
            })
            .collect();
        details.sort_by(|a, b| b.destination.created_at.cmp(&a.destination.created_at));
        Ok(details)
    }

    async fn update(
        &self,
        id: Uuid,
        user_id: Uuid,
        req: &UpdateDestinationRequest,
    ) -> Result<Option<Destination>, WishlistError> {
        let mut state = self.state.write().await;
        let now = state.next_timestamp(self.base);
        let Some(destination) = state
            .destinations
            .iter_mut()
            .find(|d| d.id == id && d.user_id == user_id)
        else {
            return Ok(None);
        };
        req.apply_to(destination);
        destination.updated_at = now;
        Ok(Some(destination.clone()))
    }

    async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<bool, WishlistError> {
        let mut state = self.state.write().await;
        let before = state.destinations.len();
        state
            .destinations
            .retain(|d| !(d.id == id && d.user_id == user_id));
        if state.destinations.len() == before {
            return Ok(false);
        }
        state.photos.retain(|p| p.destination_id != id);
        state.activities.retain(|a| a.destination_id != id);
        Ok(true)
    }
}

#[async_trait]
impl PhotoStore for MemoryStore {
    async fn create(&self, req: &NewPhoto) -> Result<Photo, WishlistError> {
        let mut state = self.state.write().await;
        let now = state.next_timestamp(self.base);
        let photo = Photo {
            id: Uuid::new_v4(),
            destination_id: req.destination_id,
            url: req.url.clone(),
            caption: req.caption.clone(),
            original_name: req.original_name.clone(),
            mime_type: req.mime_type.clone(),
            sort_order: req.sort_order,
            created_at: now,
        };
        state.photos.push(photo.clone());
        Ok(photo)
    }

    async fn find_with_owner(&self, id: Uuid) -> Result<Option<OwnedChild<Photo>>, WishlistError> {
        let state = self.state.read().await;
        Ok(state.photos.iter().find(|p| p.id == id).and_then(|photo| {
            state.owner_of(photo.destination_id).map(|owner_id| OwnedChild {
                item: photo.clone(),
                owner_id,
            })
        }))
    }

    async fn list_by_destination(&self, destination_id: Uuid) -> Result<Vec<Photo>, WishlistError> {
        Ok(self.state.read().await.photos_of(destination_id))
    }

    async fn update(
        &self,
        id: Uuid,
        req: &UpdatePhotoRequest,
    ) -> Result<Option<Photo>, WishlistError> {
        let mut state = self.state.write().await;
        let Some(photo) = state.photos.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        if let Some(caption) = &req.caption {
            photo.caption = Some(caption.clone());
        }
        Ok(Some(photo.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, WishlistError> {
        let mut state = self.state.write().await;
        let before = state.photos.len();
        state.photos.retain(|p| p.id != id);
        Ok(state.photos.len() < before)
    }

    async fn set_sort_order(
        &self,
        destination_id: Uuid,
        id: Uuid,
        sort_order: i32,
    ) -> Result<u64, WishlistError> {
        let mut state = self.state.write().await;
        match state
            .photos
            .iter_mut()
            .find(|p| p.id == id && p.destination_id == destination_id)
        {
            Some(photo) => {
                photo.sort_order = sort_order;
                Ok(1)
            }
            None => Ok(0),
        }
    }
}

#[async_trait]
impl ActivityStore for MemoryStore {
    async fn create(
        &self,
        destination_id: Uuid,
        req: &CreateActivityRequest,
    ) -> Result<Activity, WishlistError> {
        let mut state = self.state.write().await;
        let now = state.next_timestamp(self.base);
        let activity = Activity {
            id: Uuid::new_v4(),
            destination_id,
            name: req.name.clone(),
            description: req.description.clone(),
            category: req.category.clone(),
            completed: req.completed.unwrap_or(false),
            estimated_cost: req.estimated_cost,
            currency: req.currency.clone(),
            sort_order: req.sort_order.unwrap_or(0),
            created_at: now,
            updated_at: now,
        };
        state.activities.push(activity.clone());
        Ok(activity)
    }

    async fn find_with_owner(
        &self,
        id: Uuid,
    ) -> Result<Option<OwnedChild<Activity>>, WishlistError> {
        let state = self.state.read().await;
        Ok(state.activities.iter().find(|a| a.id == id).and_then(|activity| {
            state
                .owner_of(activity.destination_id)
                .map(|owner_id| OwnedChild {
                    item: activity.clone(),
                    owner_id,
                })
        }))
    }

    async fn list_by_destination(
        &self,
        destination_id: Uuid,
    ) -> Result<Vec<Activity>, WishlistError> {
        Ok(self.state.read().await.activities_of(destination_id))
    }

    async fn update(
        &self,
        id: Uuid,
        req: &UpdateActivityRequest,
    ) -> Result<Option<Activity>, WishlistError> {
        let mut state = self.state.write().await;
        let now = state.next_timestamp(self.base);
        let Some(activity) = state.activities.iter_mut().find(|a| a.id == id) else {
            return Ok(None);
        };
        req.apply_to(activity);
        activity.updated_at = now;
        Ok(Some(activity.clone()))
    }

    async fn toggle_completed(&self, id: Uuid) -> Result<Option<Activity>, WishlistError> {
        let mut state = self.state.write().await;
        let Some(activity) = state.activities.iter_mut().find(|a| a.id == id) else {
            return Ok(None);
        };
        activity.completed = !activity.completed;
        Ok(Some(activity.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, WishlistError> {
        let mut state = self.state.write().await;
        let before = state.activities.len();
        state.activities.retain(|a| a.id != id);
        Ok(state.activities.len() < before)
    }

    async fn set_sort_order(
        &self,
        destination_id: Uuid,
        id: Uuid,
        sort_order: i32,
    ) -> Result<u64, WishlistError> {
        let mut state = self.state.write().await;
        match state
            .activities
            .iter_mut()
            .find(|a| a.id == id && a.destination_id == destination_id)
        {
            Some(activity) => {
                activity.sort_order = sort_order;
                Ok(1)
            }
            None => Ok(0),
        }
    }
}

#[async_trait]
impl SuggestionStore for MemoryStore {
    async fn list_by_city(&self, city_id: Uuid) -> Result<Vec<SuggestedActivity>, WishlistError> {
        let state = self.state.read().await;
        let mut rows: Vec<SuggestedActivity> = state
            .suggestions
            .iter()
            .filter(|s| s.city_id == city_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| {
            a.sort_order
                .cmp(&b.sort_order)
                .then_with(|| a.created_at.cmp(&b.created_at))
        });
        Ok(rows)
    }

    async fn find(&self, id: Uuid) -> Result<Option<SuggestedActivity>, WishlistError> {
        let state = self.state.read().await;
        Ok(state.suggestions.iter().find(|s| s.id == id).cloned())
    }

    async fn insert_many(
        &self,
        city_id: Uuid,
        suggestions: &[NewSuggestedActivity],
    ) -> Result<Vec<SuggestedActivity>, WishlistError> {
        let mut state = self.state.write().await;
        let mut inserted = Vec::with_capacity(suggestions.len());
        for suggestion in suggestions {
            let now = state.next_timestamp(self.base);
            let row = SuggestedActivity {
                id: Uuid::new_v4(),
                city_id,
                name: suggestion.name.clone(),
                description: suggestion.description.clone(),
                category: suggestion.category.as_str().to_string(),
                estimated_cost: suggestion.estimated_cost,
                currency: suggestion.currency.clone(),
                duration: suggestion.duration.clone(),
                image_url: suggestion.image_url.clone(),
                sort_order: suggestion.sort_order,
                created_at: now,
            };
            state.suggestions.push(row.clone());
            inserted.push(row);
        }
        Ok(inserted)
    }

    async fn delete_by_city(&self, city_id: Uuid) -> Result<u64, WishlistError> {
        let mut state = self.state.write().await;
        let before = state.suggestions.len();
        state.suggestions.retain(|s| s.city_id != city_id);
        Ok((before - state.suggestions.len()) as u64)
    }
}
