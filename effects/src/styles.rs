//! Presentation rules for the states the controllers toggle.

/// Injected once into `<head>` at start.
pub const STYLES: &str = r"
.nav-bar { transition: all 0.3s ease; }
.nav-bar.scrolled { background: rgba(0, 0, 0, 0.9); backdrop-filter: blur(10px); }
.nav-bar.nav-hidden { transform: translateY(-100%); }
.nav-menu a.active { color: #d4af37; }

.reveal-element { opacity: 0; transform: translateY(30px); transition: all 0.6s ease; }
.reveal-element.revealed { opacity: 1; transform: translateY(0); }

.fade-in-up { animation: fadeInUp 0.8s ease-out both; }
@keyframes fadeInUp {
    from { opacity: 0; transform: translateY(20px); }
    to { opacity: 1; transform: translateY(0); }
}

@keyframes float {
    0%, 100% { transform: translateY(0px); }
    50% { transform: translateY(-10px); }
}

@keyframes ripple {
    to { transform: scale(4); opacity: 0; }
}

@keyframes bounceIn {
    0% { transform: scale(0.3); opacity: 0; }
    60% { transform: scale(1.1); opacity: 1; }
    100% { transform: scale(1); }
}

.option-menu.menu-hover { transform: scale(1.05); box-shadow: 0 10px 30px rgba(0,0,0,0.2); }
.sample-menu.highlight { border-left: 3px solid #d4af37; transform: translateX(10px); }

.highlight-text { color: #d4af37; animation: pulse 1s ease-in-out; }
@keyframes pulse {
    0%, 100% { opacity: 1; }
    50% { opacity: 0.7; }
}

.newsletter-popup { display: none; }
.newsletter-popup.show { display: block; }

.mobile-menu-toggle {
    display: none;
    background: none;
    border: none;
    color: white;
    font-size: 1.5rem;
    cursor: pointer;
}

@media (max-width: 768px) {
    .mobile-menu-toggle { display: block; }
    .nav-menu.mobile-open {
        display: flex;
        flex-direction: column;
        position: absolute;
        top: 100%;
        left: 0;
        right: 0;
        background: rgba(0,0,0,0.9);
        padding: 1rem;
    }
}

.notification {
    position: fixed;
    top: 20px;
    right: 20px;
    padding: 1rem 2rem;
    border-radius: 5px;
    color: white;
    transform: translateX(100%);
    transition: transform 0.3s ease;
    z-index: 10000;
}
.notification.show { transform: translateX(0); }
.notification-success { background: #27ae60; }
.notification-info { background: #3498db; }
.notification-warning { background: #f39c12; }
.notification-error { background: #e74c3c; }
";
